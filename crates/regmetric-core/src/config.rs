use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DERIVATIVE_DELTA;
use crate::error::{MetricError, Result};
use crate::interpolate::InterpolationMethod;
use crate::metric::boundary::BoundaryCondition;
use crate::metric::range::ZeroRangePolicy;

/// Options recognised by the metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    /// Finite-difference step for numeric derivatives.
    pub derivative_delta: f64,
    /// Per-parameter scales; the step for parameter `i` is
    /// `derivative_delta / sqrt(scales[i])`. `None` means all 1.0.
    pub scales: Option<Vec<f64>>,
    /// Edge extension used by the gradient operator.
    pub boundary_condition: BoundaryCondition,
    /// Behaviour when the moved gradient range is zero on an axis.
    pub zero_range_policy: ZeroRangePolicy,
    /// Interpolator used when resampling the moving image.
    pub interpolation: InterpolationMethod,
    /// Value of resampled samples that map outside the moving image.
    pub default_pixel_value: f64,
    /// Run per-axis and per-parameter loops on the Rayon pool.
    pub parallel: bool,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            derivative_delta: DEFAULT_DERIVATIVE_DELTA,
            scales: None,
            boundary_condition: BoundaryCondition::default(),
            zero_range_policy: ZeroRangePolicy::default(),
            interpolation: InterpolationMethod::default(),
            default_pixel_value: 0.0,
            parallel: false,
        }
    }
}

impl MetricConfig {
    /// Check the options against a transform with `number_of_parameters`.
    pub fn validate(&self, number_of_parameters: usize) -> Result<()> {
        if !(self.derivative_delta.is_finite() && self.derivative_delta > 0.0) {
            return Err(MetricError::invalid_config(format!(
                "derivative_delta must be positive and finite, got {}",
                self.derivative_delta
            )));
        }
        if let Some(scales) = &self.scales {
            if scales.len() != number_of_parameters {
                return Err(MetricError::invalid_config(format!(
                    "expected {} scales, got {}",
                    number_of_parameters,
                    scales.len()
                )));
            }
            if let Some(s) = scales.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
                return Err(MetricError::invalid_config(format!(
                    "scales must be positive and finite, got {s}"
                )));
            }
        }
        if !self.default_pixel_value.is_finite() {
            return Err(MetricError::invalid_config(
                "default_pixel_value must be finite",
            ));
        }
        if let BoundaryCondition::Constant { value } = self.boundary_condition {
            if !value.is_finite() {
                return Err(MetricError::invalid_config(
                    "constant boundary value must be finite",
                ));
            }
        }
        Ok(())
    }

    /// Validated scales, defaulting to 1.0 for every parameter.
    pub fn scales_for(&self, number_of_parameters: usize) -> Result<Vec<f64>> {
        self.validate(number_of_parameters)?;
        Ok(self
            .scales
            .clone()
            .unwrap_or_else(|| vec![1.0; number_of_parameters]))
    }
}

//! Gradient-difference metric: compares the Sobel gradients of the fixed
//! image with those of the moving image resampled through the transform.

use std::sync::Arc;

use ndarray::Array1;
use tracing::{debug, info, trace, warn};

use crate::config::MetricConfig;
use crate::consts::INITIAL_RESCALING_FACTOR;
use crate::error::{MetricError, Result};
use crate::image::{ImageMask, ImageRegion, ScalarImage};
use crate::resample::Resampler;
use crate::transform::{check_parameter_count, with_parameters, Transform};

use super::derivative::central_difference;
use super::gradient_field::GradientField;
use super::range::{subtraction_factors, track_range, GradientRange};
use super::samples::SampleSet;
use super::similarity::{calibrate_rescaling, evaluate_similarity};
use super::variance::{estimate_variance, FixedGradientStatistics};
use super::Evaluable;

/// Everything derived from the fixed image, plus the calibrated
/// rescaling factor. Present only after a successful `initialize`.
#[derive(Clone, Debug)]
struct FixedState<const D: usize> {
    field: GradientField<D>,
    samples: SampleSet<D>,
    statistics: FixedGradientStatistics<D>,
    rescaling_factor: f64,
}

/// Result of one evaluation with its intermediate quantities.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation<const D: usize> {
    pub value: f64,
    pub raw_sum: f64,
    pub sample_count: usize,
    pub subtraction_factors: [f64; D],
    pub moved_range: GradientRange<D>,
}

pub struct GradientDifferenceMetric<const D: usize> {
    fixed: Arc<ScalarImage<D>>,
    moving: Arc<ScalarImage<D>>,
    transform: Box<dyn Transform<D>>,
    mask: Option<Arc<dyn ImageMask<D>>>,
    fixed_region: Option<ImageRegion<D>>,
    config: MetricConfig,
    state: Option<FixedState<D>>,
}

impl<const D: usize> GradientDifferenceMetric<D> {
    pub fn new(
        fixed: Arc<ScalarImage<D>>,
        moving: Arc<ScalarImage<D>>,
        transform: Box<dyn Transform<D>>,
    ) -> Self {
        Self {
            fixed,
            moving,
            transform,
            mask: None,
            fixed_region: None,
            config: MetricConfig::default(),
            state: None,
        }
    }

    pub fn with_mask(mut self, mask: Arc<dyn ImageMask<D>>) -> Self {
        self.mask = Some(mask);
        self.state = None;
        self
    }

    /// Restrict statistics and scoring to part of the fixed image.
    pub fn with_fixed_region(mut self, region: ImageRegion<D>) -> Self {
        self.fixed_region = Some(region);
        self.state = None;
        self
    }

    pub fn with_config(mut self, config: MetricConfig) -> Self {
        self.config = config;
        self.state = None;
        self
    }

    pub fn config(&self) -> &MetricConfig {
        &self.config
    }

    pub fn transform(&self) -> &dyn Transform<D> {
        self.transform.as_ref()
    }

    pub fn fixed_region(&self) -> ImageRegion<D> {
        self.fixed_region
            .unwrap_or_else(|| self.fixed.largest_possible_region())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn rescaling_factor(&self) -> Result<f64> {
        Ok(self.state()?.rescaling_factor)
    }

    pub fn fixed_statistics(&self) -> Result<&FixedGradientStatistics<D>> {
        Ok(&self.state()?.statistics)
    }

    pub fn fixed_gradients(&self) -> Result<&GradientField<D>> {
        Ok(&self.state()?.field)
    }

    /// Compute the fixed gradients and their statistics, then calibrate the
    /// rescaling factor at `initial_parameters`.
    ///
    /// May be called again; each call starts from scratch, including the
    /// calibration. On failure the metric is left uninitialised.
    pub fn initialize_at(&mut self, initial_parameters: &[f64]) -> Result<()> {
        self.state = None;
        let n = self.transform.number_of_parameters();
        check_parameter_count(n, initial_parameters.len())?;
        self.config.validate(n)?;

        let region = self.fixed_region();
        let field = GradientField::compute(
            &self.fixed,
            &self.config.boundary_condition,
            self.config.parallel,
        )?;
        let samples = SampleSet::new(&self.fixed, &region, self.mask.as_deref())?;
        let statistics = estimate_variance(&field, &samples, self.config.parallel)?;
        for axis in 0..D {
            debug!(
                axis,
                mean = statistics.mean[axis],
                variance = statistics.variance[axis],
                min = statistics.min[axis],
                max = statistics.max[axis],
                "Fixed gradient statistics"
            );
        }

        let mut state = FixedState {
            field,
            samples,
            statistics,
            rescaling_factor: INITIAL_RESCALING_FACTOR,
        };
        let initial = self.evaluate_with(&state, initial_parameters)?;
        for axis in 0..D {
            if state.statistics.variance[axis] != 0.0 && initial.moved_range.max[axis] == 0.0 {
                warn!(axis, "Moved gradient maximum is zero, using unit factor");
            }
        }
        state.rescaling_factor = calibrate_rescaling(initial.value)?;

        info!(
            samples = state.samples.len(),
            initial_sum = initial.raw_sum,
            rescaling_factor = state.rescaling_factor,
            "Gradient difference metric initialized"
        );
        self.state = Some(state);
        Ok(())
    }

    /// Evaluate at `parameters`, returning the value and its ingredients.
    pub fn evaluate_detailed(&self, parameters: &[f64]) -> Result<Evaluation<D>> {
        let state = self.state()?;
        self.evaluate_with(state, parameters)
    }

    fn state(&self) -> Result<&FixedState<D>> {
        self.state.as_ref().ok_or_else(|| {
            MetricError::precondition("gradient difference metric used before initialize")
        })
    }

    fn evaluate_with(&self, state: &FixedState<D>, parameters: &[f64]) -> Result<Evaluation<D>> {
        let transform = with_parameters(self.transform.as_ref(), parameters)?;
        let moved = Resampler::new(&self.fixed)
            .with_interpolation(self.config.interpolation)
            .with_default_pixel_value(self.config.default_pixel_value)
            .resample(&self.moving, transform.as_ref())?;
        let moved_field = GradientField::compute(
            &moved,
            &self.config.boundary_condition,
            self.config.parallel,
        )?;

        let moved_range = track_range(&moved_field, state.samples.region())?;
        let factors = subtraction_factors(
            &state.statistics.max,
            &moved_range,
            &state.statistics.variance,
            self.config.zero_range_policy,
        )?;
        let sum = evaluate_similarity(
            &state.field,
            &moved_field,
            &state.statistics.variance,
            &factors,
            &state.samples,
            self.config.parallel,
        )?;
        let value = sum.measure(state.rescaling_factor);
        trace!(?parameters, value, raw_sum = sum.raw_sum, "Evaluated gradient difference");

        Ok(Evaluation {
            value,
            raw_sum: sum.raw_sum,
            sample_count: sum.sample_count,
            subtraction_factors: factors,
            moved_range,
        })
    }
}

impl<const D: usize> Evaluable for GradientDifferenceMetric<D> {
    fn name(&self) -> &'static str {
        "GradientDifference"
    }

    fn number_of_parameters(&self) -> usize {
        self.transform.number_of_parameters()
    }

    fn initialize(&mut self, parameters: &[f64]) -> Result<()> {
        self.initialize_at(parameters)
    }

    fn value(&self, parameters: &[f64]) -> Result<f64> {
        Ok(self.evaluate_detailed(parameters)?.value)
    }

    fn derivative(&self, parameters: &[f64]) -> Result<Array1<f64>> {
        let state = self.state()?;
        let n = self.number_of_parameters();
        check_parameter_count(n, parameters.len())?;
        let scales = self.config.scales_for(n)?;
        central_difference(
            |p| self.evaluate_with(state, p).map(|e| e.value),
            parameters,
            &scales,
            self.config.derivative_delta,
            self.config.parallel,
        )
    }
}

impl<const D: usize> std::fmt::Debug for GradientDifferenceMetric<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientDifferenceMetric")
            .field("transform", &self.transform)
            .field("fixed_region", &self.fixed_region())
            .field("masked", &self.mask.is_some())
            .field("config", &self.config)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

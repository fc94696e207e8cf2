//! Range of the moved image's gradients and the per-axis subtraction
//! factors derived from it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MetricError, Result};
use crate::image::ImageRegion;

use super::gradient_field::GradientField;

/// What to do when a contributing axis of the moved gradient field has a
/// maximum of exactly zero, which leaves `fixed_max / moved_max` undefined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroRangePolicy {
    /// Reject the evaluation with [`MetricError::InvalidInput`].
    #[default]
    Fail,
    /// Use a factor of 1.0, i.e. compare the gradients unscaled.
    UnitFactor,
}

impl std::fmt::Display for ZeroRangePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fail => write!(f, "Fail"),
            Self::UnitFactor => write!(f, "Unit Factor"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientRange<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

/// Single pass per axis over `region`, seeded from its first sample.
///
/// The mask is deliberately not consulted here.
pub fn track_range<const D: usize>(
    field: &GradientField<D>,
    region: &ImageRegion<D>,
) -> Result<GradientRange<D>> {
    if region.is_empty() {
        return Err(MetricError::invalid_input("empty fixed region"));
    }
    let full = field.largest_possible_region();
    if !full.contains_region(region) {
        return Err(MetricError::geometry(&full.to_vec(), &region.to_vec()));
    }

    let mut range = GradientRange {
        min: [0.0; D],
        max: [0.0; D],
    };
    for (axis, gradient) in field.axes().iter().enumerate() {
        let mut iter = region.iter();
        let Some(first) = iter.next() else {
            continue;
        };
        let first = gradient.get(&first);
        let (mut min, mut max) = (first, first);
        for index in iter {
            let g = gradient.get(&index);
            if g > max {
                max = g;
            }
            if g < min {
                min = g;
            }
        }
        range.min[axis] = min;
        range.max[axis] = max;
    }
    Ok(range)
}

/// `fixed_max[axis] / moved.max[axis]` for each axis with non-zero variance.
///
/// Axes with zero variance never contribute to the measure; their factor is
/// 1.0 regardless of the moved range.
pub fn subtraction_factors<const D: usize>(
    fixed_max: &[f64; D],
    moved: &GradientRange<D>,
    variance: &[f64; D],
    policy: ZeroRangePolicy,
) -> Result<[f64; D]> {
    let mut factors = [1.0; D];
    for axis in 0..D {
        if variance[axis] == 0.0 {
            continue;
        }
        if moved.max[axis] == 0.0 {
            match policy {
                ZeroRangePolicy::Fail => {
                    return Err(MetricError::invalid_input(format!(
                        "moved gradient maximum is zero on axis {axis}"
                    )));
                }
                ZeroRangePolicy::UnitFactor => {
                    debug!(axis, "Moved gradient maximum is zero, using unit factor");
                    continue;
                }
            }
        }
        factors[axis] = fixed_max[axis] / moved.max[axis];
    }
    Ok(factors)
}

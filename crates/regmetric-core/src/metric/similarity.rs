//! The gradient-difference similarity score.
//!
//! Each included sample pair `(f, m)` of a contributing axis adds
//!
//!   variance / (variance + (f - factor * m)^2)
//!
//! to the sum: 1 for identical scaled gradients, falling towards 0 as the
//! difference grows, with the fixed-gradient variance setting the width.
//! The reported measure is `-sum / rescaling_factor`, so lower is better.

use rayon::prelude::*;

use crate::consts::{INITIAL_RESCALING_FACTOR, RESCALING_STEP};
use crate::error::{MetricError, Result};
use crate::image::ScalarImage;

use super::gradient_field::GradientField;
use super::samples::SampleSet;

/// Unnormalised similarity: the sum of per-sample contributions and the
/// number of sample pairs that contributed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimilaritySum {
    pub raw_sum: f64,
    pub sample_count: usize,
}

impl SimilaritySum {
    pub fn measure(&self, rescaling_factor: f64) -> f64 {
        -self.raw_sum / rescaling_factor
    }
}

/// Sum contributions over every axis with non-zero variance.
///
/// Axes are summed separately and combined in axis order, so the parallel
/// and sequential paths give identical results.
pub fn evaluate_similarity<const D: usize>(
    fixed: &GradientField<D>,
    moved: &GradientField<D>,
    variance: &[f64; D],
    subtraction_factors: &[f64; D],
    samples: &SampleSet<D>,
    parallel: bool,
) -> Result<SimilaritySum> {
    if fixed.size() != moved.size() {
        return Err(MetricError::geometry(&fixed.size(), &moved.size()));
    }
    let region = fixed.largest_possible_region();
    if !region.contains_region(samples.region()) {
        return Err(MetricError::geometry(
            &region.to_vec(),
            &samples.region().to_vec(),
        ));
    }

    let axis_sum = |axis: usize| -> SimilaritySum {
        if variance[axis] == 0.0 {
            return SimilaritySum::default();
        }
        SimilaritySum {
            raw_sum: axis_similarity(
                fixed.axis(axis),
                moved.axis(axis),
                variance[axis],
                subtraction_factors[axis],
                samples,
            ),
            sample_count: samples.len(),
        }
    };

    let per_axis: Vec<SimilaritySum> = if parallel {
        (0..D).into_par_iter().map(axis_sum).collect()
    } else {
        (0..D).map(axis_sum).collect()
    };

    Ok(per_axis
        .into_iter()
        .fold(SimilaritySum::default(), |acc, s| SimilaritySum {
            raw_sum: acc.raw_sum + s.raw_sum,
            sample_count: acc.sample_count + s.sample_count,
        }))
}

fn axis_similarity<const D: usize>(
    fixed: &ScalarImage<D>,
    moved: &ScalarImage<D>,
    variance: f64,
    factor: f64,
    samples: &SampleSet<D>,
) -> f64 {
    samples
        .indices()
        .iter()
        .map(|index| {
            let diff = fixed.get(index) - factor * moved.get(index);
            variance / (variance + diff * diff)
        })
        .sum()
}

/// Smallest power of ten (starting at 1) that brings `|initial_measure|`
/// down to at most 1.
pub fn calibrate_rescaling(initial_measure: f64) -> Result<f64> {
    if !initial_measure.is_finite() {
        return Err(MetricError::invalid_input(format!(
            "initial measure is not finite ({initial_measure})"
        )));
    }
    let mut factor = INITIAL_RESCALING_FACTOR;
    while initial_measure.abs() / factor > 1.0 {
        factor *= RESCALING_STEP;
    }
    Ok(factor)
}

//! Per-axis noise estimate of the fixed image's gradients.

use rayon::prelude::*;

use crate::error::{MetricError, Result};
use crate::image::ScalarImage;

use super::gradient_field::GradientField;
use super::samples::SampleSet;

/// Mean, population variance and range of each fixed gradient axis over
/// the included samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedGradientStatistics<const D: usize> {
    pub mean: [f64; D],
    pub variance: [f64; D],
    pub min: [f64; D],
    pub max: [f64; D],
    pub sample_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct AxisStatistics {
    mean: f64,
    variance: f64,
    min: f64,
    max: f64,
}

/// Estimate gradient statistics of every axis of `field` over `samples`.
///
/// Two passes per axis: the first accumulates the sum and the running
/// min/max, the second the squared deviations from the resulting mean.
///
/// The min/max start at zero, so `max` is never below zero and `min` never
/// above it. `max` is the numerator of the subtraction factor.
pub fn estimate_variance<const D: usize>(
    field: &GradientField<D>,
    samples: &SampleSet<D>,
    parallel: bool,
) -> Result<FixedGradientStatistics<D>> {
    if samples.is_empty() {
        return Err(MetricError::invalid_input(
            "no fixed-image samples inside the mask and region",
        ));
    }
    let region = field.largest_possible_region();
    if !region.contains_region(samples.region()) {
        return Err(MetricError::geometry(
            &region.to_vec(),
            &samples.region().to_vec(),
        ));
    }

    let per_axis: Vec<AxisStatistics> = if parallel {
        field
            .axes()
            .par_iter()
            .map(|gradient| axis_statistics(gradient, samples))
            .collect()
    } else {
        field
            .axes()
            .iter()
            .map(|gradient| axis_statistics(gradient, samples))
            .collect()
    };

    let mut stats = FixedGradientStatistics {
        mean: [0.0; D],
        variance: [0.0; D],
        min: [0.0; D],
        max: [0.0; D],
        sample_count: samples.len(),
    };
    for (axis, s) in per_axis.into_iter().enumerate() {
        stats.mean[axis] = s.mean;
        stats.variance[axis] = s.variance;
        stats.min[axis] = s.min;
        stats.max[axis] = s.max;
    }
    Ok(stats)
}

fn axis_statistics<const D: usize>(
    gradient: &ScalarImage<D>,
    samples: &SampleSet<D>,
) -> AxisStatistics {
    let indices = samples.indices();
    let count = indices.len() as f64;

    let mut sum = 0.0;
    let mut min = 0.0_f64;
    let mut max = 0.0_f64;
    for index in indices {
        let g = gradient.get(index);
        sum += g;
        min = min.min(g);
        max = max.max(g);
    }
    let mean = sum / count;

    let mut squared = 0.0;
    for index in indices {
        let dev = gradient.get(index) - mean;
        squared += dev * dev;
    }

    AxisStatistics {
        mean,
        variance: squared / count,
        min,
        max,
    }
}

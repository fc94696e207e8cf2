//! Resampling of the moving image onto the fixed image's grid.

use ndarray::{ArrayD, IxDyn};
use rayon::prelude::*;

use crate::consts::PARALLEL_SAMPLE_THRESHOLD;
use crate::error::Result;
use crate::image::ScalarImage;
use crate::interpolate::InterpolationMethod;
use crate::transform::Transform;

/// Produces a copy of a moving image aligned to a reference grid.
///
/// For every reference index the physical point is mapped through the
/// transform into moving space and interpolated there. Points that land
/// outside the moving image receive `default_pixel_value`.
#[derive(Clone, Debug)]
pub struct Resampler<'a, const D: usize> {
    reference: &'a ScalarImage<D>,
    interpolation: InterpolationMethod,
    default_pixel_value: f64,
}

impl<'a, const D: usize> Resampler<'a, D> {
    pub fn new(reference: &'a ScalarImage<D>) -> Self {
        Self {
            reference,
            interpolation: InterpolationMethod::default(),
            default_pixel_value: 0.0,
        }
    }

    pub fn with_interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_default_pixel_value(mut self, value: f64) -> Self {
        self.default_pixel_value = value;
        self
    }

    pub fn resample(
        &self,
        moving: &ScalarImage<D>,
        transform: &dyn Transform<D>,
    ) -> Result<ScalarImage<D>> {
        let region = self.reference.largest_possible_region();
        let sample = |index: &[usize; D]| -> f64 {
            let fixed_point = self.reference.index_to_physical_point(index);
            let moving_point = transform.transform_point(&fixed_point);
            let continuous = moving.physical_point_to_continuous_index(&moving_point);
            self.interpolation
                .evaluate(moving, &continuous)
                .unwrap_or(self.default_pixel_value)
        };

        let values: Vec<f64> = if region.number_of_samples() >= PARALLEL_SAMPLE_THRESHOLD {
            let indices: Vec<[usize; D]> = region.iter().collect();
            indices.par_iter().map(sample).collect()
        } else {
            region.iter().map(|index| sample(&index)).collect()
        };

        let data = ArrayD::from_shape_vec(IxDyn(&region.size), values)?;
        self.reference.with_data(data)
    }
}

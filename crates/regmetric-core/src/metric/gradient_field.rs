//! Directional derivative images computed with a separable Sobel operator.
//!
//! For the derivative along axis `a` the image is correlated with the taps
//! `[-1, 0, 1]` along `a` and with the smoothing taps `[1, 2, 1]` along
//! every other axis. In 2-D this is the familiar
//!   Gx = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]
//! kernel. The passes run one axis at a time over the whole image and the
//! result is fully materialised, since the metric reads it many times.

use ndarray::{ArrayD, Axis};
use rayon::prelude::*;

use crate::consts::{SOBEL_DERIVATIVE, SOBEL_SMOOTHING};
use crate::error::{MetricError, Result};
use crate::image::{ImageRegion, ScalarImage};

use super::boundary::BoundaryCondition;

/// One derivative image per spatial axis of a source image.
#[derive(Clone, Debug)]
pub struct GradientField<const D: usize> {
    axes: Vec<ScalarImage<D>>,
}

impl<const D: usize> GradientField<D> {
    /// Compute the derivative along every axis of `image`.
    ///
    /// With `parallel` the axes are computed on separate Rayon tasks; each
    /// axis is produced by the same sequential code either way.
    pub fn compute(
        image: &ScalarImage<D>,
        boundary: &BoundaryCondition,
        parallel: bool,
    ) -> Result<Self> {
        let axes = if parallel {
            (0..D)
                .into_par_iter()
                .map(|axis| compute_axis(image, axis, boundary))
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..D)
                .map(|axis| compute_axis(image, axis, boundary))
                .collect::<Result<Vec<_>>>()?
        };
        Ok(Self { axes })
    }

    pub fn axis(&self, axis: usize) -> &ScalarImage<D> {
        &self.axes[axis]
    }

    pub fn axes(&self) -> &[ScalarImage<D>] {
        &self.axes
    }

    pub fn size(&self) -> [usize; D] {
        self.axes[0].size()
    }

    pub fn largest_possible_region(&self) -> ImageRegion<D> {
        self.axes[0].largest_possible_region()
    }
}

/// Derivative of `image` along `axis`.
pub fn compute_axis<const D: usize>(
    image: &ScalarImage<D>,
    axis: usize,
    boundary: &BoundaryCondition,
) -> Result<ScalarImage<D>> {
    if axis >= D {
        return Err(MetricError::invalid_input(format!(
            "gradient axis {axis} out of range for a {D}-dimensional image"
        )));
    }

    // Outside samples of the intermediate images are the boundary constant
    // pushed through every pass already applied.
    let mut fill = boundary.fill_value();
    let mut data = image.data().to_owned();
    for k in 0..D {
        let taps = if k == axis {
            &SOBEL_DERIVATIVE
        } else {
            &SOBEL_SMOOTHING
        };
        data = correlate_along(&data, Axis(k), taps, boundary, fill);
        fill *= taps.iter().sum::<f64>();
    }

    image.with_data(data)
}

fn correlate_along(
    data: &ArrayD<f64>,
    axis: Axis,
    taps: &[f64; 3],
    boundary: &BoundaryCondition,
    fill: f64,
) -> ArrayD<f64> {
    let mut out = ArrayD::<f64>::zeros(data.raw_dim());
    let radius = (taps.len() / 2) as isize;

    for (src, mut dst) in data.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        let len = src.len();
        for i in 0..len {
            let mut acc = 0.0;
            for (t, &w) in taps.iter().enumerate() {
                if w == 0.0 {
                    continue;
                }
                let j = i as isize + t as isize - radius;
                let v = match boundary.map_index(j, len) {
                    Some(j) => src[j],
                    None => fill,
                };
                acc += w * v;
            }
            dst[i] = acc;
        }
    }

    out
}

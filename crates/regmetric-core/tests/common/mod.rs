#![allow(dead_code)]

use std::sync::Arc;

use ndarray::{Array2, Array3, ArrayD};

use regmetric_core::config::MetricConfig;
use regmetric_core::image::ScalarImage;
use regmetric_core::metric::GradientDifferenceMetric;
use regmetric_core::transform::TranslationTransform;

/// 2-D image with unit spacing whose sample at `(row, col)` is `f(row, col)`.
pub fn image_2d(h: usize, w: usize, f: impl Fn(usize, usize) -> f64) -> ScalarImage<2> {
    let data: ArrayD<f64> = Array2::from_shape_fn((h, w), |(r, c)| f(r, c)).into_dyn();
    ScalarImage::from_array(data).unwrap()
}

pub fn image_3d(
    d: usize,
    h: usize,
    w: usize,
    f: impl Fn(usize, usize, usize) -> f64,
) -> ScalarImage<3> {
    let data: ArrayD<f64> = Array3::from_shape_fn((d, h, w), |(z, r, c)| f(z, r, c)).into_dyn();
    ScalarImage::from_array(data).unwrap()
}

pub fn constant_image(h: usize, w: usize, value: f64) -> ScalarImage<2> {
    image_2d(h, w, |_, _| value)
}

/// Columns left of `edge_col` are 0, the rest are 100.
pub fn vertical_edge(h: usize, w: usize, edge_col: usize) -> ScalarImage<2> {
    image_2d(h, w, |_, c| if c < edge_col { 0.0 } else { 100.0 })
}

/// Smooth pattern with structure along both axes, defined off the grid too.
pub fn pattern(y: f64, x: f64) -> f64 {
    50.0 + 30.0 * (0.45 * y).sin() * (0.3 * x).cos() + 4.0 * x - 0.1 * y * y
}

pub fn textured(h: usize, w: usize) -> ScalarImage<2> {
    image_2d(h, w, |r, c| pattern(r as f64, c as f64))
}

/// Translation-driven gradient difference metric over two 2-D images.
pub fn translation_metric(
    fixed: ScalarImage<2>,
    moving: ScalarImage<2>,
    config: MetricConfig,
) -> GradientDifferenceMetric<2> {
    GradientDifferenceMetric::new(
        Arc::new(fixed),
        Arc::new(moving),
        Box::new(TranslationTransform::<2>::identity()),
    )
    .with_config(config)
}

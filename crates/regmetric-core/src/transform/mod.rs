//! Parametric spatial transforms mapping fixed-image points into the
//! moving image's physical space.

pub mod affine;
pub mod translation;

use std::fmt::Debug;

use nalgebra::DMatrix;

use crate::error::{MetricError, Result};
use crate::image::Point;

pub use affine::AffineTransform;
pub use translation::TranslationTransform;

/// A transform driven by a flat parameter vector.
///
/// Metrics never mutate a caller's transform: each evaluation works on a
/// [`Transform::box_clone`] with the trial parameters applied.
pub trait Transform<const D: usize>: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn number_of_parameters(&self) -> usize;

    fn parameters(&self) -> Vec<f64>;

    /// Replace all parameters. Fails if `parameters` has the wrong length.
    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()>;

    fn transform_point(&self, point: &Point<D>) -> Point<D>;

    /// Partial derivatives of the mapped point with respect to each
    /// parameter, as a `D x number_of_parameters` matrix.
    fn jacobian(&self, point: &Point<D>) -> DMatrix<f64>;

    fn box_clone(&self) -> Box<dyn Transform<D>>;
}

impl<const D: usize> Clone for Box<dyn Transform<D>> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Clone `transform` and apply `parameters` to the copy.
pub fn with_parameters<const D: usize>(
    transform: &dyn Transform<D>,
    parameters: &[f64],
) -> Result<Box<dyn Transform<D>>> {
    let mut trial = transform.box_clone();
    trial.set_parameters(parameters)?;
    Ok(trial)
}

pub(crate) fn check_parameter_count(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(MetricError::ParameterCount { expected, actual });
    }
    Ok(())
}

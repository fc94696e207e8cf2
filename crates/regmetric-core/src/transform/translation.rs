use nalgebra::DMatrix;

use crate::error::Result;
use crate::image::Point;

use super::{check_parameter_count, Transform};

/// Shifts every point by a fixed offset. Parameters are the offset
/// components, one per axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslationTransform<const D: usize> {
    offset: Point<D>,
}

impl<const D: usize> TranslationTransform<D> {
    pub fn new(offset: Point<D>) -> Self {
        Self { offset }
    }

    pub fn identity() -> Self {
        Self::new(Point::zeros())
    }

    pub fn offset(&self) -> &Point<D> {
        &self.offset
    }
}

impl<const D: usize> Default for TranslationTransform<D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const D: usize> Transform<D> for TranslationTransform<D> {
    fn name(&self) -> &'static str {
        "TranslationTransform"
    }

    fn number_of_parameters(&self) -> usize {
        D
    }

    fn parameters(&self) -> Vec<f64> {
        self.offset.iter().copied().collect()
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_parameter_count(D, parameters.len())?;
        self.offset = Point::from_column_slice(parameters);
        Ok(())
    }

    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        point + self.offset
    }

    fn jacobian(&self, _point: &Point<D>) -> DMatrix<f64> {
        DMatrix::identity(D, D)
    }

    fn box_clone(&self) -> Box<dyn Transform<D>> {
        Box::new(self.clone())
    }
}

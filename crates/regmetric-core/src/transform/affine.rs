use nalgebra::DMatrix;

use crate::error::Result;
use crate::image::{Direction, Point};

use super::{check_parameter_count, Transform};

/// General linear map plus translation about a fixed centre:
/// `T(x) = A (x - c) + c + t`.
///
/// Parameters are the entries of `A` in row-major order followed by the
/// components of `t`, `D * D + D` values in total. The centre is not a
/// parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct AffineTransform<const D: usize> {
    matrix: Direction<D>,
    translation: Point<D>,
    center: Point<D>,
}

impl<const D: usize> AffineTransform<D> {
    pub fn new(matrix: Direction<D>, translation: Point<D>, center: Point<D>) -> Self {
        Self {
            matrix,
            translation,
            center,
        }
    }

    pub fn identity() -> Self {
        Self::new(Direction::identity(), Point::zeros(), Point::zeros())
    }

    pub fn with_center(mut self, center: Point<D>) -> Self {
        self.center = center;
        self
    }

    pub fn matrix(&self) -> &Direction<D> {
        &self.matrix
    }

    pub fn translation(&self) -> &Point<D> {
        &self.translation
    }

    pub fn center(&self) -> &Point<D> {
        &self.center
    }
}

impl<const D: usize> Default for AffineTransform<D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const D: usize> Transform<D> for AffineTransform<D> {
    fn name(&self) -> &'static str {
        "AffineTransform"
    }

    fn number_of_parameters(&self) -> usize {
        D * D + D
    }

    fn parameters(&self) -> Vec<f64> {
        let mut params = Vec::with_capacity(D * D + D);
        for row in 0..D {
            for col in 0..D {
                params.push(self.matrix[(row, col)]);
            }
        }
        params.extend(self.translation.iter());
        params
    }

    fn set_parameters(&mut self, parameters: &[f64]) -> Result<()> {
        check_parameter_count(D * D + D, parameters.len())?;
        for row in 0..D {
            for col in 0..D {
                self.matrix[(row, col)] = parameters[row * D + col];
            }
        }
        self.translation = Point::from_column_slice(&parameters[D * D..]);
        Ok(())
    }

    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        self.matrix * (point - self.center) + self.center + self.translation
    }

    fn jacobian(&self, point: &Point<D>) -> DMatrix<f64> {
        let relative = point - self.center;
        let mut jac = DMatrix::zeros(D, D * D + D);
        for row in 0..D {
            for col in 0..D {
                jac[(row, row * D + col)] = relative[col];
            }
            jac[(row, D * D + row)] = 1.0;
        }
        jac
    }

    fn box_clone(&self) -> Box<dyn Transform<D>> {
        Box::new(self.clone())
    }
}

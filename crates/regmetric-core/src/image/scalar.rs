use ndarray::{ArrayD, IxDyn};

use crate::error::{MetricError, Result};

use super::{Direction, ImageRegion, Point};

/// An N-dimensional grid of real samples with physical geometry.
///
/// Array axis `k` corresponds to index component `k` and to column `k` of
/// the direction matrix. A sample at index `i` sits at the physical point
/// `origin + direction * (spacing .* i)`.
#[derive(Clone, Debug)]
pub struct ScalarImage<const D: usize> {
    data: ArrayD<f64>,
    origin: Point<D>,
    spacing: [f64; D],
    direction: Direction<D>,
    inverse_direction: Direction<D>,
}

impl<const D: usize> ScalarImage<D> {
    pub fn new(
        data: ArrayD<f64>,
        origin: Point<D>,
        spacing: [f64; D],
        direction: Direction<D>,
    ) -> Result<Self> {
        if D == 0 || data.ndim() != D {
            return Err(MetricError::geometry(&[D], &[data.ndim()]));
        }
        if data.is_empty() {
            return Err(MetricError::invalid_input("image has no samples"));
        }
        if let Some(s) = spacing.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(MetricError::invalid_input(format!(
                "spacing must be positive and finite, got {s}"
            )));
        }
        let inverse_direction = direction
            .try_inverse()
            .filter(|inv| inv.iter().all(|v| v.is_finite()))
            .ok_or_else(|| MetricError::invalid_input("direction matrix is singular"))?;

        Ok(Self {
            data,
            origin,
            spacing,
            direction,
            inverse_direction,
        })
    }

    /// Image with zero origin, unit spacing and identity direction.
    pub fn from_array(data: ArrayD<f64>) -> Result<Self> {
        Self::new(data, Point::zeros(), [1.0; D], Direction::identity())
    }

    /// A new image on the same grid holding `data`.
    pub fn with_data(&self, data: ArrayD<f64>) -> Result<Self> {
        if data.shape() != self.data.shape() {
            return Err(MetricError::geometry(self.data.shape(), data.shape()));
        }
        Ok(Self {
            data,
            origin: self.origin,
            spacing: self.spacing,
            direction: self.direction,
            inverse_direction: self.inverse_direction,
        })
    }

    /// A zero-filled image on the same grid.
    pub fn zeros_like(&self) -> Self {
        Self {
            data: ArrayD::zeros(self.data.raw_dim()),
            ..self.clone()
        }
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    pub fn spacing(&self) -> &[f64; D] {
        &self.spacing
    }

    pub fn direction(&self) -> &Direction<D> {
        &self.direction
    }

    pub fn size(&self) -> [usize; D] {
        let mut size = [0; D];
        size.copy_from_slice(self.data.shape());
        size
    }

    pub fn largest_possible_region(&self) -> ImageRegion<D> {
        ImageRegion::from_size(self.size())
    }

    pub fn get(&self, index: &[usize; D]) -> f64 {
        self.data[IxDyn(index)]
    }

    /// Sample at an index that may lie outside the grid.
    pub fn checked_get(&self, index: &[usize; D]) -> Option<f64> {
        self.data.get(IxDyn(index)).copied()
    }

    pub fn index_to_physical_point(&self, index: &[usize; D]) -> Point<D> {
        let mut scaled = Point::<D>::zeros();
        for k in 0..D {
            scaled[k] = index[k] as f64 * self.spacing[k];
        }
        self.origin + self.direction * scaled
    }

    /// Inverse of [`Self::index_to_physical_point`] without rounding.
    pub fn physical_point_to_continuous_index(&self, point: &Point<D>) -> Point<D> {
        let mut index = self.inverse_direction * (point - self.origin);
        for k in 0..D {
            index[k] /= self.spacing[k];
        }
        index
    }

    /// Nearest grid index of a physical point, if it falls inside the grid.
    pub fn physical_point_to_index(&self, point: &Point<D>) -> Option<[usize; D]> {
        let continuous = self.physical_point_to_continuous_index(point);
        let size = self.size();
        let mut index = [0; D];
        for k in 0..D {
            let rounded = continuous[k].round();
            if !(rounded >= 0.0 && rounded < size[k] as f64) {
                return None;
            }
            index[k] = rounded as usize;
        }
        Some(index)
    }

    /// True if both images share size, origin, spacing and direction.
    pub fn same_grid(&self, other: &ScalarImage<D>) -> bool {
        self.data.shape() == other.data.shape()
            && self.origin == other.origin
            && self.spacing == other.spacing
            && self.direction == other.direction
    }
}

//! Penalty on the displacement magnitude `||T(x) - x||^2`.
//!
//! Minimising it pulls the transform towards the identity. Composed with a
//! fixed initial transform it can be used to invert that transform.

use std::sync::Arc;

use nalgebra::DVector;
use ndarray::Array1;
use tracing::info;

use crate::error::{MetricError, Result};
use crate::image::{ImageMask, ImageRegion, Point, ScalarImage};
use crate::transform::{check_parameter_count, with_parameters, Transform};

use super::samples::SampleSet;
use super::Evaluable;

pub struct DisplacementMagnitudePenalty<const D: usize> {
    fixed: Arc<ScalarImage<D>>,
    transform: Box<dyn Transform<D>>,
    mask: Option<Arc<dyn ImageMask<D>>>,
    fixed_region: Option<ImageRegion<D>>,
    points: Option<Vec<Point<D>>>,
}

impl<const D: usize> DisplacementMagnitudePenalty<D> {
    pub fn new(fixed: Arc<ScalarImage<D>>, transform: Box<dyn Transform<D>>) -> Self {
        Self {
            fixed,
            transform,
            mask: None,
            fixed_region: None,
            points: None,
        }
    }

    pub fn with_mask(mut self, mask: Arc<dyn ImageMask<D>>) -> Self {
        self.mask = Some(mask);
        self.points = None;
        self
    }

    pub fn with_fixed_region(mut self, region: ImageRegion<D>) -> Self {
        self.fixed_region = Some(region);
        self.points = None;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.points.is_some()
    }

    fn points(&self) -> Result<&[Point<D>]> {
        self.points.as_deref().ok_or_else(|| {
            MetricError::precondition("displacement magnitude penalty used before initialize")
        })
    }
}

impl<const D: usize> Evaluable for DisplacementMagnitudePenalty<D> {
    fn name(&self) -> &'static str {
        "DisplacementMagnitudePenalty"
    }

    fn number_of_parameters(&self) -> usize {
        self.transform.number_of_parameters()
    }

    /// Collect the physical points of the included fixed samples.
    fn initialize(&mut self, parameters: &[f64]) -> Result<()> {
        self.points = None;
        check_parameter_count(self.number_of_parameters(), parameters.len())?;
        let region = self
            .fixed_region
            .unwrap_or_else(|| self.fixed.largest_possible_region());
        let samples = SampleSet::new(&self.fixed, &region, self.mask.as_deref())?;
        if samples.is_empty() {
            return Err(MetricError::invalid_input(
                "no fixed-image samples inside the mask and region",
            ));
        }
        let points: Vec<Point<D>> = samples
            .indices()
            .iter()
            .map(|index| self.fixed.index_to_physical_point(index))
            .collect();
        info!(samples = points.len(), "Displacement magnitude penalty initialized");
        self.points = Some(points);
        Ok(())
    }

    fn value(&self, parameters: &[f64]) -> Result<f64> {
        let points = self.points()?;
        let transform = with_parameters(self.transform.as_ref(), parameters)?;
        let sum: f64 = points
            .iter()
            .map(|p| (transform.transform_point(p) - p).norm_squared())
            .sum();
        Ok(sum / points.len() as f64)
    }

    /// `(2 / N) * sum J(x)^T (T(x) - x)`, using the transform Jacobian.
    fn derivative(&self, parameters: &[f64]) -> Result<Array1<f64>> {
        let points = self.points()?;
        let transform = with_parameters(self.transform.as_ref(), parameters)?;
        let mut gradient = DVector::<f64>::zeros(parameters.len());
        for p in points {
            let displacement = transform.transform_point(p) - p;
            let jacobian = transform.jacobian(p);
            let displacement = DVector::from_column_slice(displacement.as_slice());
            gradient += jacobian.transpose() * displacement;
        }
        gradient *= 2.0 / points.len() as f64;
        Ok(Array1::from(gradient.as_slice().to_vec()))
    }
}

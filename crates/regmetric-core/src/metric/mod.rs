//! Similarity metrics and penalty terms over transform parameters.

pub mod boundary;
pub mod combination;
pub mod derivative;
pub mod displacement;
pub mod gradient_difference;
pub mod gradient_field;
pub mod range;
mod registry;
pub mod samples;
pub mod similarity;
pub mod variance;

use ndarray::Array1;

use crate::error::Result;

pub use boundary::BoundaryCondition;
pub use combination::CombinedMetric;
pub use displacement::DisplacementMagnitudePenalty;
pub use gradient_difference::{Evaluation, GradientDifferenceMetric};
pub use gradient_field::GradientField;
pub use range::ZeroRangePolicy;
pub use registry::{MetricConstructor, MetricInputs, MetricRegistry};

/// An objective over a transform parameter vector: what an optimiser
/// consumes.
pub trait Evaluable {
    fn name(&self) -> &'static str;

    fn number_of_parameters(&self) -> usize;

    /// Prepare for evaluation, starting from `parameters`. Must succeed
    /// before `value`/`derivative` are called.
    fn initialize(&mut self, _parameters: &[f64]) -> Result<()> {
        Ok(())
    }

    fn value(&self, parameters: &[f64]) -> Result<f64>;

    fn derivative(&self, parameters: &[f64]) -> Result<Array1<f64>>;

    /// Value followed by derivative; nothing is shared between the two.
    fn value_and_derivative(&self, parameters: &[f64]) -> Result<(f64, Array1<f64>)> {
        let value = self.value(parameters)?;
        let derivative = self.derivative(parameters)?;
        Ok((value, derivative))
    }
}

/// The closed set of metrics.
pub enum Metric<const D: usize> {
    GradientDifference(GradientDifferenceMetric<D>),
    DisplacementMagnitude(DisplacementMagnitudePenalty<D>),
    Combination(CombinedMetric<D>),
}

impl<const D: usize> Metric<D> {
    fn as_evaluable(&self) -> &dyn Evaluable {
        match self {
            Self::GradientDifference(m) => m,
            Self::DisplacementMagnitude(m) => m,
            Self::Combination(m) => m,
        }
    }

    fn as_evaluable_mut(&mut self) -> &mut dyn Evaluable {
        match self {
            Self::GradientDifference(m) => m,
            Self::DisplacementMagnitude(m) => m,
            Self::Combination(m) => m,
        }
    }
}

impl<const D: usize> Evaluable for Metric<D> {
    fn name(&self) -> &'static str {
        self.as_evaluable().name()
    }

    fn number_of_parameters(&self) -> usize {
        self.as_evaluable().number_of_parameters()
    }

    fn initialize(&mut self, parameters: &[f64]) -> Result<()> {
        self.as_evaluable_mut().initialize(parameters)
    }

    fn value(&self, parameters: &[f64]) -> Result<f64> {
        self.as_evaluable().value(parameters)
    }

    fn derivative(&self, parameters: &[f64]) -> Result<Array1<f64>> {
        self.as_evaluable().derivative(parameters)
    }
}

impl<const D: usize> From<GradientDifferenceMetric<D>> for Metric<D> {
    fn from(m: GradientDifferenceMetric<D>) -> Self {
        Self::GradientDifference(m)
    }
}

impl<const D: usize> From<DisplacementMagnitudePenalty<D>> for Metric<D> {
    fn from(m: DisplacementMagnitudePenalty<D>) -> Self {
        Self::DisplacementMagnitude(m)
    }
}

impl<const D: usize> From<CombinedMetric<D>> for Metric<D> {
    fn from(m: CombinedMetric<D>) -> Self {
        Self::Combination(m)
    }
}

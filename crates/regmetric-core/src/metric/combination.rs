use ndarray::Array1;

use crate::error::{MetricError, Result};

use super::{Evaluable, Metric};

/// Weighted sum of metrics sharing one transform parameterisation.
pub struct CombinedMetric<const D: usize> {
    terms: Vec<(f64, Metric<D>)>,
}

impl<const D: usize> CombinedMetric<D> {
    pub fn new(terms: Vec<(f64, Metric<D>)>) -> Result<Self> {
        let Some((_, first)) = terms.first() else {
            return Err(MetricError::invalid_config("combination has no terms"));
        };
        let n = first.number_of_parameters();
        for (weight, metric) in &terms {
            if !weight.is_finite() {
                return Err(MetricError::invalid_config(format!(
                    "weight of {} is not finite",
                    metric.name()
                )));
            }
            if metric.number_of_parameters() != n {
                return Err(MetricError::invalid_config(format!(
                    "{} has {} parameters, expected {}",
                    metric.name(),
                    metric.number_of_parameters(),
                    n
                )));
            }
        }
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[(f64, Metric<D>)] {
        &self.terms
    }
}

impl<const D: usize> Evaluable for CombinedMetric<D> {
    fn name(&self) -> &'static str {
        "Combination"
    }

    fn number_of_parameters(&self) -> usize {
        self.terms[0].1.number_of_parameters()
    }

    fn initialize(&mut self, parameters: &[f64]) -> Result<()> {
        for (_, metric) in &mut self.terms {
            metric.initialize(parameters)?;
        }
        Ok(())
    }

    fn value(&self, parameters: &[f64]) -> Result<f64> {
        let mut total = 0.0;
        for (weight, metric) in &self.terms {
            total += weight * metric.value(parameters)?;
        }
        Ok(total)
    }

    fn derivative(&self, parameters: &[f64]) -> Result<Array1<f64>> {
        let mut total = Array1::<f64>::zeros(parameters.len());
        for (weight, metric) in &self.terms {
            total.scaled_add(*weight, &metric.derivative(parameters)?);
        }
        Ok(total)
    }
}

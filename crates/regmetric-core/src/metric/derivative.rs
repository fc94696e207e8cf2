use ndarray::Array1;
use rayon::prelude::*;

use crate::error::{MetricError, Result};

/// Central-difference derivative of `evaluate` at `parameters`.
///
/// Parameter `i` is stepped by `delta / sqrt(scales[i])` in each direction
/// on a private copy of the parameter vector; every index is independent,
/// so with `parallel` the indices run on separate Rayon tasks.
pub fn central_difference<F>(
    evaluate: F,
    parameters: &[f64],
    scales: &[f64],
    delta: f64,
    parallel: bool,
) -> Result<Array1<f64>>
where
    F: Fn(&[f64]) -> Result<f64> + Sync,
{
    if scales.len() != parameters.len() {
        return Err(MetricError::ParameterCount {
            expected: parameters.len(),
            actual: scales.len(),
        });
    }
    if let Some(s) = scales.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
        return Err(MetricError::invalid_config(format!(
            "parameter scales must be positive, got {s}"
        )));
    }
    if !(delta.is_finite() && delta > 0.0) {
        return Err(MetricError::invalid_config(format!(
            "derivative delta must be positive, got {delta}"
        )));
    }

    let partial = |i: usize| -> Result<f64> {
        let step = delta / scales[i].sqrt();
        let mut point = parameters.to_vec();
        point[i] -= step;
        let below = evaluate(&point)?;
        point[i] += 2.0 * step;
        let above = evaluate(&point)?;
        Ok((above - below) / (2.0 * step))
    };

    let values: Vec<f64> = if parallel {
        (0..parameters.len())
            .into_par_iter()
            .map(partial)
            .collect::<Result<_>>()?
    } else {
        (0..parameters.len())
            .map(partial)
            .collect::<Result<_>>()?
    };
    Ok(Array1::from(values))
}

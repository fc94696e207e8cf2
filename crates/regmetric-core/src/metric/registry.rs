use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::MetricConfig;
use crate::error::{MetricError, Result};
use crate::image::{ImageMask, ImageRegion, ScalarImage};
use crate::transform::Transform;

use super::{DisplacementMagnitudePenalty, GradientDifferenceMetric, Metric};

/// Everything a metric constructor may need.
#[derive(Clone)]
pub struct MetricInputs<const D: usize> {
    pub fixed: Arc<ScalarImage<D>>,
    pub moving: Arc<ScalarImage<D>>,
    pub transform: Box<dyn Transform<D>>,
    pub mask: Option<Arc<dyn ImageMask<D>>>,
    pub fixed_region: Option<ImageRegion<D>>,
    pub config: MetricConfig,
}

pub type MetricConstructor<const D: usize> = fn(MetricInputs<D>) -> Result<Metric<D>>;

/// Name-to-constructor table for selecting metrics from configuration.
pub struct MetricRegistry<const D: usize> {
    constructors: BTreeMap<String, MetricConstructor<D>>,
}

impl<const D: usize> Default for MetricRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> MetricRegistry<D> {
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Registry holding the metrics shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("GradientDifference", build_gradient_difference::<D>);
        registry.register("DisplacementMagnitudePenalty", build_displacement_penalty::<D>);
        registry
    }

    /// Add or replace a constructor.
    pub fn register(&mut self, name: impl Into<String>, constructor: MetricConstructor<D>) {
        self.constructors.insert(name.into(), constructor);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn create(&self, name: &str, inputs: MetricInputs<D>) -> Result<Metric<D>> {
        let constructor = self.constructors.get(name).ok_or_else(|| {
            MetricError::invalid_config(format!(
                "unknown metric '{name}' (known: {})",
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })?;
        constructor(inputs)
    }
}

fn build_gradient_difference<const D: usize>(inputs: MetricInputs<D>) -> Result<Metric<D>> {
    let mut metric = GradientDifferenceMetric::new(inputs.fixed, inputs.moving, inputs.transform)
        .with_config(inputs.config);
    if let Some(mask) = inputs.mask {
        metric = metric.with_mask(mask);
    }
    if let Some(region) = inputs.fixed_region {
        metric = metric.with_fixed_region(region);
    }
    Ok(metric.into())
}

fn build_displacement_penalty<const D: usize>(inputs: MetricInputs<D>) -> Result<Metric<D>> {
    let mut metric = DisplacementMagnitudePenalty::new(inputs.fixed, inputs.transform);
    if let Some(mask) = inputs.mask {
        metric = metric.with_mask(mask);
    }
    if let Some(region) = inputs.fixed_region {
        metric = metric.with_fixed_region(region);
    }
    Ok(metric.into())
}

pub mod config;
pub mod evaluate;
pub mod info;
pub mod sweep;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use regmetric_core::config::MetricConfig;
use regmetric_core::image::{BinaryImageMask, ImageMask, Point, ScalarImage};
use regmetric_core::io::load_image;
use regmetric_core::metric::{Metric, MetricInputs, MetricRegistry};
use regmetric_core::transform::{AffineTransform, Transform, TranslationTransform};
use tracing::debug;

#[derive(Clone, Copy, ValueEnum)]
pub enum TransformArg {
    Translation,
    Affine,
}

/// Inputs shared by every command that evaluates a metric.
#[derive(Args)]
pub struct MetricArgs {
    /// Fixed (reference) image
    pub fixed: PathBuf,

    /// Moving image
    pub moving: PathBuf,

    /// Fixed-image mask; non-zero pixels are included
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Metric configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Transform model
    #[arg(long, value_enum, default_value = "translation")]
    pub transform: TransformArg,

    /// Transform parameters, comma separated (identity if omitted)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub params: Option<Vec<f64>>,

    /// Registered metric name
    #[arg(long, default_value = "GradientDifference")]
    pub metric: String,
}

/// A metric ready to initialise, plus the starting parameters.
pub struct MetricSetup {
    pub metric: Metric<2>,
    pub config: MetricConfig,
    pub transform_name: &'static str,
    pub parameters: Vec<f64>,
}

pub fn load_config(path: Option<&Path>) -> Result<MetricConfig> {
    let Some(path) = path else {
        return Ok(MetricConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))
}

fn load(path: &Path) -> Result<ScalarImage<2>> {
    load_image(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Physical centre of the fixed image grid.
fn grid_center(image: &ScalarImage<2>) -> Point<2> {
    let [h, w] = image.size();
    let first = image.index_to_physical_point(&[0, 0]);
    let last = image.index_to_physical_point(&[h - 1, w - 1]);
    (first + last) / 2.0
}

fn build_transform(kind: TransformArg, fixed: &ScalarImage<2>) -> Box<dyn Transform<2>> {
    match kind {
        TransformArg::Translation => Box::new(TranslationTransform::<2>::identity()),
        TransformArg::Affine => {
            Box::new(AffineTransform::<2>::identity().with_center(grid_center(fixed)))
        }
    }
}

pub fn build_metric(args: &MetricArgs) -> Result<MetricSetup> {
    let config = load_config(args.config.as_deref())?;
    let fixed = load(&args.fixed)?;
    let moving = load(&args.moving)?;
    let mask = match &args.mask {
        Some(path) => {
            let mask: Arc<dyn ImageMask<2>> = Arc::new(BinaryImageMask::new(load(path)?));
            Some(mask)
        }
        None => None,
    };

    let transform = build_transform(args.transform, &fixed);
    let transform_name = transform.name();
    let parameters = match &args.params {
        Some(params) => {
            if params.len() != transform.number_of_parameters() {
                bail!(
                    "{} takes {} parameters, got {}",
                    transform_name,
                    transform.number_of_parameters(),
                    params.len()
                );
            }
            params.clone()
        }
        None => transform.parameters(),
    };

    let inputs = MetricInputs {
        fixed: Arc::new(fixed),
        moving: Arc::new(moving),
        transform,
        mask,
        fixed_region: None,
        config: config.clone(),
    };
    let metric = MetricRegistry::<2>::with_builtin().create(&args.metric, inputs)?;
    debug!(metric = %args.metric, transform = transform_name, ?parameters, "Metric created");

    Ok(MetricSetup {
        metric,
        config,
        transform_name,
        parameters,
    })
}

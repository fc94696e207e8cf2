use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use regmetric_core::io::load_image;
use regmetric_core::metric::samples::SampleSet;
use regmetric_core::metric::variance::estimate_variance;
use regmetric_core::metric::GradientField;

use super::load_config;
use crate::summary::print_image_statistics;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,

    /// Metric configuration (TOML); selects the boundary condition
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Report image geometry and the gradient statistics the metric would
/// compute for it as a fixed image.
pub fn run(args: &InfoArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let field = GradientField::compute(&image, &config.boundary_condition, config.parallel)?;
    let samples = SampleSet::new(&image, &image.largest_possible_region(), None)?;
    let stats = estimate_variance(&field, &samples, config.parallel)?;

    print_image_statistics(&args.file, image.size(), *image.spacing(), &stats);
    Ok(())
}

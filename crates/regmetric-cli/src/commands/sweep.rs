use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use regmetric_core::metric::Evaluable;

use super::{build_metric, MetricArgs};
use crate::summary::print_config_summary;

#[derive(Args)]
pub struct SweepArgs {
    #[command(flatten)]
    pub metric: MetricArgs,

    /// Index of the parameter to vary
    #[arg(long)]
    pub param: usize,

    /// First value of the swept parameter
    #[arg(long, allow_hyphen_values = true)]
    pub from: f64,

    /// Last value of the swept parameter
    #[arg(long, allow_hyphen_values = true)]
    pub to: f64,

    /// Number of evaluations, endpoints included
    #[arg(long, default_value = "21")]
    pub steps: usize,
}

/// Evaluate the metric along one parameter, all others held at their
/// starting values.
pub fn run(args: &SweepArgs) -> Result<()> {
    if args.steps < 2 {
        bail!("--steps must be at least 2");
    }
    let mut setup = build_metric(&args.metric)?;
    let base = setup.parameters.clone();
    if args.param >= base.len() {
        bail!(
            "parameter index {} out of range ({} parameters)",
            args.param,
            base.len()
        );
    }

    print_config_summary(setup.metric.name(), setup.transform_name, &setup.config);
    setup.metric.initialize(&base)?;

    let pb = ProgressBar::new(args.steps as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Sweeping [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let span = args.to - args.from;
    let mut samples = Vec::with_capacity(args.steps);
    for i in 0..args.steps {
        let mut params = base.clone();
        params[args.param] = args.from + span * i as f64 / (args.steps - 1) as f64;
        let value = setup.metric.value(&params)?;
        samples.push((params[args.param], value));
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("{:>6}  {:>14}  {:>14}", "Step", "Parameter", "Value");
    println!("{}", "-".repeat(38));
    for (i, (x, value)) in samples.iter().enumerate() {
        println!("{:>6}  {:>14.6}  {:>14.8}", i, x, value);
    }

    if let Some((x, value)) = samples
        .iter()
        .copied()
        .min_by(|a, b| a.1.total_cmp(&b.1))
    {
        println!("\nMinimum at {:.6}: {:.8}", x, value);
    }

    Ok(())
}

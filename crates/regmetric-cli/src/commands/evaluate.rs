use anyhow::Result;
use clap::Args;
use regmetric_core::metric::{Evaluable, Metric};

use super::{build_metric, MetricArgs};
use crate::summary::{print_config_summary, print_evaluation_details, print_result};

#[derive(Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub metric: MetricArgs,
}

/// Initialise the metric at the given parameters and report its value and
/// derivative there.
pub fn run(args: &EvaluateArgs) -> Result<()> {
    let mut setup = build_metric(&args.metric)?;
    let params = setup.parameters.clone();

    print_config_summary(setup.metric.name(), setup.transform_name, &setup.config);

    setup.metric.initialize(&params)?;
    let (value, derivative) = setup.metric.value_and_derivative(&params)?;
    print_result(&params, value, &derivative.to_vec());

    if let Metric::GradientDifference(gd) = &setup.metric {
        let evaluation = gd.evaluate_detailed(&params)?;
        print_evaluation_details(&evaluation, gd.rescaling_factor()?);
    }

    Ok(())
}

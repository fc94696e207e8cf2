use console::Style;
use regmetric_core::config::MetricConfig;
use regmetric_core::metric::variance::FixedGradientStatistics;
use regmetric_core::metric::Evaluation;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

pub fn print_config_summary(metric_name: &str, transform_name: &str, config: &MetricConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(metric_name));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(metric_name.len())));
    println!();
    println!(
        "  {:<16}{}",
        s.label.apply_to("Transform"),
        s.method.apply_to(transform_name)
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Boundary"),
        s.method.apply_to(&config.boundary_condition)
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Interpolation"),
        s.method.apply_to(config.interpolation)
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Zero range"),
        s.method.apply_to(config.zero_range_policy)
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Delta"),
        s.value.apply_to(config.derivative_delta)
    );
    println!();
}

pub fn print_result(parameters: &[f64], value: f64, derivative: &[f64]) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Parameters"),
        s.value.apply_to(format_vector(parameters))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Value"),
        s.value.apply_to(format!("{value:.8}"))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Derivative"),
        s.value.apply_to(format_vector(derivative))
    );
    println!();
}

pub fn print_evaluation_details(evaluation: &Evaluation<2>, rescaling_factor: f64) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Details"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Raw sum"),
        s.value.apply_to(format!("{:.6}", evaluation.raw_sum))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Samples"),
        s.value.apply_to(evaluation.sample_count)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Rescaling"),
        s.value.apply_to(rescaling_factor)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Factors"),
        s.value.apply_to(format_vector(&evaluation.subtraction_factors))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Moved max"),
        s.value.apply_to(format_vector(&evaluation.moved_range.max))
    );
    println!();
}

pub fn print_image_statistics(
    path: &std::path::Path,
    size: [usize; 2],
    spacing: [f64; 2],
    stats: &FixedGradientStatistics<2>,
) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.path.apply_to(path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{} x {}", size[0], size[1]))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Spacing"),
        s.value.apply_to(format_vector(&spacing))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Samples"),
        s.value.apply_to(stats.sample_count)
    );
    println!();

    println!("  {}", s.header.apply_to("Gradient statistics"));
    println!(
        "    {:>4}  {:>14}  {:>14}  {:>14}  {:>14}",
        "Axis", "Mean", "Variance", "Min", "Max"
    );
    println!("    {}", "-".repeat(68));
    for axis in 0..2 {
        println!(
            "    {:>4}  {:>14.6}  {:>14.6}  {:>14.6}  {:>14.6}",
            axis, stats.mean[axis], stats.variance[axis], stats.min[axis], stats.max[axis]
        );
    }
    println!();
}

use anyhow::Context;
use log::info;
use timing_plot::chart::{Chart, LegendPosition};
use timing_plot::timing_plot::parse_cli;
use timing_plot::{bounce_label, plot_slice, Dataset, X_LABEL, Y_LABEL};

fn main() -> anyhow::Result<()> {
    let args = parse_cli();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!(
        "read data from {} and plot to {}",
        args.csvin.display(),
        args.svgout.display()
    );
    let dataset = Dataset::from_csv(&args.csvin)
        .with_context(|| format!("loading {}", args.csvin.display()))?;
    info!("loaded {} measurements", dataset.len());

    let bounces = if args.all_bounces {
        dataset.bounce_counts()
    } else {
        args.bounces
    };
    let mut chart = Chart::new();
    for b in bounces {
        plot_slice(&mut chart, &dataset, b, bounce_label(b));
    }
    chart.set_y_label(Y_LABEL);
    chart.set_x_label(X_LABEL);
    chart.set_legend(LegendPosition::UpperLeft);

    chart
        .export(&args.svgout)
        .with_context(|| format!("exporting {}", args.svgout.display()))?;
    info!(
        "saved {} points to {}",
        chart.points(),
        args.svgout.display()
    );
    Ok(())
}

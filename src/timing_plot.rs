use super::{DEFAULT_BOUNCES, DEFAULT_CSVIN, DEFAULT_SVGOUT, VERSION};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Plotting options taken from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotArgs {
    pub csvin: PathBuf,
    pub svgout: PathBuf,
    pub bounces: Vec<i64>,
    pub all_bounces: bool,
    pub verbose: bool,
}

fn command() -> Command {
    let arg_csvin = Arg::new("input_csvfile")
        .help("name of the csv file with distance,bounces,time rows")
        .short('f')
        .long("csvfile")
        .num_args(1)
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_CSVIN);
    let arg_svgout = Arg::new("output_svgfile")
        .help("name of the output svg file, overwritten if present")
        .short('o')
        .long("svgfile")
        .num_args(1)
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_SVGOUT);
    let default_bounces: Vec<String> = DEFAULT_BOUNCES.iter().map(|b| b.to_string()).collect();
    let arg_bounces = Arg::new("bounces")
        .help(format!(
            "bounce counts to plot, one line each [default: {}]",
            default_bounces.join(" ")
        ))
        .short('b')
        .long("bounces")
        .num_args(1..)
        .value_parser(value_parser!(i64));
    let arg_all_bounces = Arg::new("all_bounces")
        .help("plot every bounce count found in the csv file")
        .long("all-bounces")
        .action(ArgAction::SetTrue)
        .conflicts_with("bounces");
    let arg_verbose = Arg::new("verbose")
        .help("print verbose information")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue);
    Command::new("timing_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the render time against the view distance, one line per bounce count")
        .arg(arg_csvin)
        .arg(arg_svgout)
        .arg(arg_bounces)
        .arg(arg_all_bounces)
        .arg(arg_verbose)
}

// get_one always returns Some(T) for the args with a default,
// therefore it is safe to simply unwrap them;
// bounces has no clap default, missing means DEFAULT_BOUNCES
fn plot_args(cli_args: &ArgMatches) -> PlotArgs {
    let csvin = cli_args
        .get_one::<PathBuf>("input_csvfile")
        .unwrap()
        .to_owned();
    let svgout = cli_args
        .get_one::<PathBuf>("output_svgfile")
        .unwrap()
        .to_owned();
    let bounces: Vec<i64> = match cli_args.get_many::<i64>("bounces") {
        Some(b) => b.copied().collect(),
        None => DEFAULT_BOUNCES.to_vec(),
    };
    PlotArgs {
        csvin,
        svgout,
        bounces,
        all_bounces: cli_args.get_flag("all_bounces"),
        verbose: cli_args.get_flag("verbose"),
    }
}

/// Takes the CLI arguments that control the plotting of the timing measurements.
pub fn parse_cli() -> PlotArgs {
    plot_args(&command().get_matches())
}

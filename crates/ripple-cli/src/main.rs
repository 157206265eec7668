#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use ripple_core::config::{LoadedConfig, load_config, load_config_file};
use ripple_core::registry::validate_registry;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ripple: network centralities and influence-experiment reports",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for ripple crates.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./ripple.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Networks",
        about = "Compute node centralities of every network",
        long_about = "Load each registered network found in the networks directory and write \
                      its PageRank, betweenness, and degree centralities to \
                      <centralities>/<Network>-centralities.txt.",
        after_help = "EXAMPLES:\n    # Every network present under [paths] networks\n    ripple centralities\n\n    # Just two networks, JSON summary\n    ripple centralities --network Dolphins --network Wiki-Vote.txt --json"
    )]
    Centralities(cmd::centralities::CentralitiesArgs),

    #[command(
        next_help_heading = "Networks",
        about = "Print the min and max degree of every network",
        after_help = "EXAMPLES:\n    ripple degree-range\n    ripple degree-range --network enron --format text"
    )]
    DegreeRange(cmd::degree_range::DegreeRangeArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Print the threshold histogram of one file",
        after_help = "EXAMPLES:\n    ripple histogram results/second-experiment/malicious/thresholds/Dolphins.txt"
    )]
    Histogram(cmd::histogram::HistogramArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Print the aggregated statistics of one results file",
        after_help = "EXAMPLES:\n    ripple stats results/first-experiment/complete/th-0.25/model-1.txt\n\n    # Only networks with a row, as JSON\n    ripple stats model-1.txt --present-only --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Report",
        about = "Render metric tables for every experiment",
        after_help = "EXAMPLES:\n    ripple tables\n    ripple tables --results ./results --plots ./paper/tables"
    )]
    Tables(cmd::tables::TablesArgs),

    #[command(
        next_help_heading = "Report",
        about = "Render threshold figures for every experiment",
        after_help = "EXAMPLES:\n    ripple plots\n    ripple plots --plots ./paper/figures"
    )]
    Plots(cmd::plots::PlotsArgs),

    #[command(
        next_help_heading = "Report",
        about = "Render tables and figures for every experiment",
        after_help = "EXAMPLES:\n    ripple report\n    ripple --config paper/ripple.toml report --json"
    )]
    Report(cmd::report::ReportArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("RIPPLE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "ripple=debug,info"
        } else {
            "ripple=info,warn"
        })
    });

    let format = env::var("RIPPLE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load(cli: &Cli) -> anyhow::Result<LoadedConfig> {
    let loaded = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => load_config(&env::current_dir()?)?,
    };
    debug!(
        source = ?loaded.source,
        base = %loaded.base_dir.display(),
        "configuration"
    );
    Ok(loaded)
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    validate_registry()?;
    let config = load(cli)?;

    match &cli.command {
        Commands::Centralities(args) => {
            cmd::centralities::run_centralities(args, &config, output)
        }
        Commands::DegreeRange(args) => cmd::degree_range::run_degree_range(args, &config, output),
        Commands::Histogram(args) => cmd::histogram::run_histogram(args, output),
        Commands::Stats(args) => cmd::stats::run_stats(args, output),
        Commands::Tables(args) => cmd::tables::run_tables(args, &config, output),
        Commands::Plots(args) => cmd::plots::run_plots(args, &config, output),
        Commands::Report(args) => cmd::report::run_report(args, &config, output),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = resolve_output_mode(cli.format, cli.json);

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if render_error(output, &CliError::from(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

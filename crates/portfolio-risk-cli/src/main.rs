mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::process;

use commands::report::ReportArgs;

/// Portfolio vs benchmark risk report
#[derive(Parser)]
#[command(
    name = "risk-report",
    version,
    about = "Portfolio risk reporting",
    long_about = "Renders an HTML report comparing a portfolio with a benchmark: \
                  cumulative and active performance charts plus annualised \
                  performance, risk, Sharpe ratio and tracking error. \
                  The metrics table is also printed to stdout."
)]
struct Cli {
    #[command(flatten)]
    report: ReportArgs,

    /// Output format for the metrics summary
    #[arg(long, default_value = "table")]
    format: OutputFormat,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match commands::report::run_report(cli.report) {
        Ok(value) => {
            output::format_output(&cli.format, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

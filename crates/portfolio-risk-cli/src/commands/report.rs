use clap::Args;
use colored::Colorize;
use log::debug;
use portfolio_risk_core::performance::{CsvPerformance, PerformanceSource};
use portfolio_risk_core::report::{self, Report};
use portfolio_risk_core::{risk, Metadata, ABOUT_KEY};
use serde_json::Value;
use std::path::PathBuf;

use crate::config::{Overrides, ReportConfig};
use crate::input;

/// Arguments for rendering a portfolio report
#[derive(Args)]
pub struct ReportArgs {
    /// Name of the portfolio
    #[arg(short, long)]
    pub portfolio: String,

    /// Name of the benchmark
    #[arg(short, long)]
    pub benchmark: String,

    /// About the portfolio
    #[arg(short, long)]
    pub about: Option<String>,

    /// Performance CSV (date column plus one column per series)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Where to write the HTML report
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// JSON or YAML settings file
    #[arg(long)]
    pub config: Option<String>,
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let file_config: ReportConfig = match args.config.as_deref() {
        Some(path) => input::file::read_config(path)?,
        None => ReportConfig::default(),
    };
    let config = file_config.resolve(Overrides {
        data: args.data,
        report: args.report,
        about: args.about,
    })?;
    debug!("resolved configuration: {:?}", config);

    let perf = CsvPerformance::from_path(&config.data)?;
    let portfolio = perf.fetch_portfolio_performance(&args.portfolio)?;
    let benchmark = perf.fetch_portfolio_performance(&args.benchmark)?;

    let mut metadata = Metadata::new();
    if let Some(about) = config.about {
        metadata.insert(ABOUT_KEY, about);
    }

    let written = report::run_report(
        &Report::standard(&config.settings),
        &portfolio,
        Some(&benchmark),
        &metadata,
        &config.report,
    )?;
    eprintln!("{} {}", "report written to".green().bold(), written.display());

    let summary = risk::summarize(&portfolio, Some(&benchmark), config.settings.trading_days)?;
    Ok(serde_json::to_value(summary)?)
}

use portfolio_risk_core::performance::DEFAULT_DATA_PATH;
use portfolio_risk_core::report::{PlotSize, ReportSettings, DEFAULT_REPORT_PATH};
use serde::Deserialize;
use std::path::PathBuf;

/// Optional settings file. Every field can also be given on the command
/// line, which takes precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub data: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub about: Option<String>,
    pub trading_days: Option<u32>,
    pub plot_width: Option<u32>,
    pub plot_height: Option<u32>,
}

/// Values taken from the command line that override the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub data: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub about: Option<String>,
}

/// Fully resolved run settings.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub data: PathBuf,
    pub report: PathBuf,
    pub about: Option<String>,
    pub settings: ReportSettings,
}

const MIN_PLOT_DIM: u32 = 100;
const MAX_PLOT_DIM: u32 = 4000;

impl ReportConfig {
    /// Layer `overrides` over the file values, then defaults.
    pub fn resolve(self, overrides: Overrides) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
        let defaults = ReportSettings::default();

        let trading_days = self.trading_days.unwrap_or(defaults.trading_days);
        if trading_days == 0 {
            return Err("trading_days must be positive".into());
        }

        let plot_size = PlotSize {
            width: self.plot_width.unwrap_or(defaults.plot_size.width),
            height: self.plot_height.unwrap_or(defaults.plot_size.height),
        };
        if plot_size.width < MIN_PLOT_DIM || plot_size.height < MIN_PLOT_DIM {
            return Err(format!(
                "plot size {}x{} is too small (minimum {}x{})",
                plot_size.width, plot_size.height, MIN_PLOT_DIM, MIN_PLOT_DIM
            )
            .into());
        }
        if plot_size.width > MAX_PLOT_DIM || plot_size.height > MAX_PLOT_DIM {
            return Err(format!(
                "plot size {}x{} is too large (maximum {}x{})",
                plot_size.width, plot_size.height, MAX_PLOT_DIM, MAX_PLOT_DIM
            )
            .into());
        }

        Ok(ResolvedConfig {
            data: overrides
                .data
                .or(self.data)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            report: overrides
                .report
                .or(self.report)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH)),
            about: overrides.about.or(self.about),
            settings: ReportSettings {
                trading_days,
                plot_size,
            },
        })
    }
}

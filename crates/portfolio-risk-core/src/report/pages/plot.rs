use log::debug;

use crate::error::ReportError;
use crate::report::chart::{embed_png, growth_chart, render_png};
use crate::report::{PlotSize, ReportPage};
use crate::types::*;
use crate::ReportResult;

/// Growth-of-100 chart of the portfolio returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformancePlot {
    pub size: PlotSize,
}

impl ReportPage for PerformancePlot {
    fn name(&self) -> &str {
        "performance_plot"
    }

    fn render(
        &self,
        portfolio: &ReturnSeries,
        _benchmark: Option<&ReturnSeries>,
        _metadata: &Metadata,
    ) -> ReportResult<String> {
        let chart = growth_chart(portfolio, portfolio.name())?;
        let png = render_png(&chart, self.size.dimensions())?;
        debug!("performance plot for '{}': {} bytes", portfolio.name(), png.len());
        Ok(embed_png(&png))
    }
}

/// Growth-of-100 chart of the active returns (portfolio minus benchmark).
///
/// Requires a benchmark.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivePerformancePlot {
    pub size: PlotSize,
}

impl ReportPage for ActivePerformancePlot {
    fn name(&self) -> &str {
        "active_performance_plot"
    }

    fn render(
        &self,
        portfolio: &ReturnSeries,
        benchmark: Option<&ReturnSeries>,
        _metadata: &Metadata,
    ) -> ReportResult<String> {
        let benchmark = benchmark.ok_or_else(|| ReportError::MissingBenchmark {
            page: self.name().to_string(),
        })?;

        let active = portfolio.difference(benchmark)?;
        let title = format!("{} vs {}", portfolio.name(), benchmark.name());
        let chart = growth_chart(&active, &title)?;
        let png = render_png(&chart, self.size.dimensions())?;
        debug!("active performance plot for '{}': {} bytes", title, png.len());
        Ok(embed_png(&png))
    }
}

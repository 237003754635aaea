mod chart;
pub mod pages;

pub use chart::growth_index;
pub use pages::{ActivePerformancePlot, PerformancePlot, PerformanceTable, TitlePage};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::risk::TRADING_DAYS;
use crate::types::*;
use crate::ReportResult;

/// Default output location, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "report.html";

/// One section of a report.
///
/// Pages are independent: each sees the same inputs and produces an HTML
/// fragment without touching shared state.
pub trait ReportPage {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &str;

    fn render(
        &self,
        portfolio: &ReturnSeries,
        benchmark: Option<&ReturnSeries>,
        metadata: &Metadata,
    ) -> ReportResult<String>;
}

/// Pixel dimensions of rendered charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotSize {
    pub width: u32,
    pub height: u32,
}

impl PlotSize {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for PlotSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Knobs for the standard report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Annualisation constant
    pub trading_days: u32,
    pub plot_size: PlotSize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            trading_days: TRADING_DAYS,
            plot_size: PlotSize::default(),
        }
    }
}

/// An ordered sequence of pages.
#[derive(Default)]
pub struct Report {
    pages: Vec<Box<dyn ReportPage>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title, performance plot, active performance plot, performance table.
    pub fn standard(settings: &ReportSettings) -> Self {
        Self::new()
            .with_page(TitlePage)
            .with_page(PerformancePlot {
                size: settings.plot_size,
            })
            .with_page(ActivePerformancePlot {
                size: settings.plot_size,
            })
            .with_page(PerformanceTable {
                trading_days: settings.trading_days,
            })
    }

    pub fn with_page(mut self, page: impl ReportPage + 'static) -> Self {
        self.pages.push(Box::new(page));
        self
    }

    pub fn page_names(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Render every page in order and concatenate the fragments.
    ///
    /// The first failing page aborts the render.
    pub fn render(
        &self,
        portfolio: &ReturnSeries,
        benchmark: Option<&ReturnSeries>,
        metadata: &Metadata,
    ) -> ReportResult<String> {
        let mut html = String::new();
        for page in &self.pages {
            debug!("rendering page '{}'", page.name());
            html.push_str(&page.render(portfolio, benchmark, metadata)?);
        }
        Ok(html)
    }
}

/// Render `report` and write it as a standalone HTML document to `path`.
///
/// The document is written to a temporary file next to `path` and moved
/// into place, so a failed run leaves any previous report untouched.
pub fn run_report(
    report: &Report,
    portfolio: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    metadata: &Metadata,
    path: impl AsRef<Path>,
) -> ReportResult<PathBuf> {
    let path = path.as_ref();
    let body = report.render(portfolio, benchmark, metadata)?;
    let html = document(portfolio, benchmark, &body);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(html.as_bytes())?;
    tmp.persist(path).map_err(|e| ReportError::Io(e.error))?;

    info!("report written to '{}' ({} bytes)", path.display(), html.len());
    Ok(path.to_path_buf())
}

fn document(portfolio: &ReturnSeries, benchmark: Option<&ReturnSeries>, body: &str) -> String {
    let title = match benchmark {
        Some(b) => format!("{} vs {}", portfolio.name(), b.name()),
        None => portfolio.name().to_string(),
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
<title>Portfolio report: {}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(&title),
        body
    )
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

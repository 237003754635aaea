use crate::report::{escape_html, ReportPage};
use crate::types::*;
use crate::ReportResult;

/// Report heading naming the portfolio and benchmark, followed by the
/// optional "about" text from the metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitlePage;

impl ReportPage for TitlePage {
    fn name(&self) -> &str {
        "title"
    }

    fn render(
        &self,
        portfolio: &ReturnSeries,
        benchmark: Option<&ReturnSeries>,
        metadata: &Metadata,
    ) -> ReportResult<String> {
        let versus = benchmark
            .map(|b| format!(" vs {}", escape_html(b.name())))
            .unwrap_or_default();
        let about = escape_html(metadata.about().unwrap_or_default());

        Ok(format!(
            "<h1>Portfolio report for {}{}</h1><p>{}</p>",
            escape_html(portfolio.name()),
            versus,
            about
        ))
    }
}

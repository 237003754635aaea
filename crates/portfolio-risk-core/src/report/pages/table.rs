use crate::report::{escape_html, ReportPage};
use crate::risk::{metrics_table, MetricsTable, TRADING_DAYS};
use crate::types::*;
use crate::ReportResult;

/// Annualised metrics of portfolio and benchmark as an HTML table.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceTable {
    pub trading_days: u32,
}

impl Default for PerformanceTable {
    fn default() -> Self {
        Self {
            trading_days: TRADING_DAYS,
        }
    }
}

impl ReportPage for PerformanceTable {
    fn name(&self) -> &str {
        "performance_table"
    }

    fn render(
        &self,
        portfolio: &ReturnSeries,
        benchmark: Option<&ReturnSeries>,
        _metadata: &Metadata,
    ) -> ReportResult<String> {
        let table = metrics_table(portfolio, benchmark, self.trading_days)?;
        Ok(table_html(&table))
    }
}

fn table_html(table: &MetricsTable) -> String {
    let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n");
    html.push_str("    <tr style=\"text-align: right;\">\n      <th></th>\n");
    for column in &table.columns {
        html.push_str(&format!("      <th>{}</th>\n", escape_html(column)));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in &table.rows {
        html.push_str(&format!("    <tr>\n      <th>{}</th>\n", escape_html(&row.label)));
        for cell in &row.cells {
            html.push_str(&format!("      <td>{}</td>\n", escape_html(cell)));
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>");
    html
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::metrics::{metrics, overflow, tracking_error};
use crate::types::*;
use crate::ReportResult;

pub const PERFORMANCE_ROW: &str = "Performance (%)";
pub const RISK_ROW: &str = "Risk (%)";
pub const SHARPE_ROW: &str = "Sharpe";
pub const TRACKING_ERROR_ROW: &str = "TE (%)";

/// Placeholder for cells with no meaningful value.
pub const EMPTY_CELL: &str = "-";

/// One labelled row of the comparison table, one cell per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub label: String,
    pub cells: Vec<String>,
}

/// Side-by-side annualised metrics for a portfolio and optional benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsTable {
    /// Series names, portfolio first
    pub columns: Vec<String>,
    pub rows: Vec<MetricsRow>,
}

impl MetricsTable {
    pub fn row(&self, label: &str) -> Option<&MetricsRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Cell at `label` for the series named `column`.
    pub fn cell(&self, label: &str, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.row(label)
            .and_then(|r| r.cells.get(idx))
            .map(String::as_str)
    }
}

/// Build the derived comparison rows: annualised performance, risk, Sharpe
/// and, with a benchmark, tracking error.
pub fn metrics_table(
    portfolio: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    trading_days: u32,
) -> ReportResult<MetricsTable> {
    let mut records = vec![(portfolio.name().to_string(), metrics(portfolio)?)];
    if let Some(bench) = benchmark {
        records.push((bench.name().to_string(), metrics(bench)?));
    }

    let mut performance = Vec::with_capacity(records.len());
    let mut risk = Vec::with_capacity(records.len());
    let mut sharpe = Vec::with_capacity(records.len());
    for (name, record) in &records {
        let annual_return = record.annualised_return(trading_days).and_then(format_pct);
        let annual_risk = record.annualised_risk(trading_days).and_then(format_pct);
        let annual_sharpe = record.annualised_sharpe(trading_days).map(format_fixed);
        match (annual_return, annual_risk, annual_sharpe) {
            (Some(r), Some(v), Some(s)) => {
                performance.push(r);
                risk.push(v);
                sharpe.push(s);
            }
            _ => return Err(overflow(name)),
        }
    }

    let mut rows = vec![
        MetricsRow {
            label: PERFORMANCE_ROW.into(),
            cells: performance,
        },
        MetricsRow {
            label: RISK_ROW.into(),
            cells: risk,
        },
        MetricsRow {
            label: SHARPE_ROW.into(),
            cells: sharpe,
        },
    ];

    if let Some(bench) = benchmark {
        let te = tracking_error(portfolio, bench, trading_days)?
            .checked_mul(dec!(100))
            .ok_or_else(|| overflow(portfolio.name()))?;
        rows.push(MetricsRow {
            label: TRACKING_ERROR_ROW.into(),
            cells: vec![format_fixed(te), EMPTY_CELL.into()],
        });
    }

    Ok(MetricsTable {
        columns: records.into_iter().map(|(name, _)| name).collect(),
        rows,
    })
}

/// Comparison table wrapped in the standard output envelope.
pub fn summarize(
    portfolio: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    trading_days: u32,
) -> ReportResult<ComputationOutput<MetricsTable>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for series in std::iter::once(portfolio).chain(benchmark) {
        if series.len() < 2 {
            warnings.push(format!(
                "'{}' has {} observation(s); risk is reported as zero",
                series.name(),
                series.len()
            ));
        }
    }

    if let Some(bench) = benchmark {
        let shared = portfolio.difference(bench)?.len();
        let dropped = portfolio.len() + bench.len() - 2 * shared;
        if dropped > 0 {
            warnings.push(format!(
                "{} date(s) not shared by '{}' and '{}' were ignored for tracking error",
                dropped,
                portfolio.name(),
                bench.name()
            ));
        }
    }

    let table = metrics_table(portfolio, benchmark, trading_days)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annualised mean return, volatility, Sharpe ratio and tracking error",
        &serde_json::json!({
            "trading_days": trading_days,
            "portfolio": portfolio.name(),
            "portfolio_observations": portfolio.len(),
            "benchmark": benchmark.map(|b| b.name()),
            "benchmark_observations": benchmark.map(|b| b.len()),
        }),
        warnings,
        elapsed,
        table,
    ))
}

/// `0.0123` -> `"1.23%"`
fn format_pct(value: Rate) -> Option<String> {
    let pct = value.checked_mul(dec!(100))?;
    Some(format!("{}%", format_fixed(pct)))
}

fn format_fixed(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    // avoid printing "-0.00"
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pct_pads_two_places() {
        assert_eq!(format_pct(Decimal::ZERO).as_deref(), Some("0.00%"));
        assert_eq!(format_pct(dec!(0.1234)).as_deref(), Some("12.34%"));
        assert_eq!(format_pct(dec!(-0.05)).as_deref(), Some("-5.00%"));
        assert_eq!(format_pct(Decimal::MAX), None);
    }

    #[test]
    fn test_format_fixed_rounds() {
        assert_eq!(format_fixed(dec!(1.005)), "1.00");
        assert_eq!(format_fixed(dec!(2.3456)), "2.35");
        assert_eq!(format_fixed(dec!(7)), "7.00");
        assert_eq!(format_fixed(dec!(-0.001)), "0.00");
    }
}

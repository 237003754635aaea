use chrono::NaiveDate;
use portfolio_risk_core::performance::{CsvPerformance, PerformanceSource};
use portfolio_risk_core::ReportError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use std::io::Write;

const TABLE: &str = "\
date,GROWTH,VALUE,MSCI_WORLD
2024-01-03,0.012,-0.004,0.006
2024-01-02,0.010,0.002,0.005
2024-01-04,-0.003,0.001,-0.002
";

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_lists_series_names() {
    let perf = CsvPerformance::from_reader(TABLE.as_bytes()).unwrap();
    assert_eq!(perf.names(), vec!["GROWTH", "VALUE", "MSCI_WORLD"]);
    assert_eq!(perf.len(), 3);
}

#[test]
fn test_fetch_returns_date_ordered_series() {
    let perf = CsvPerformance::from_reader(TABLE.as_bytes()).unwrap();
    let s = perf.fetch_portfolio_performance("GROWTH").unwrap();
    assert_eq!(s.name(), "GROWTH");
    assert_eq!(s.dates(), &[date(2), date(3), date(4)]);
    assert_eq!(s.values(), &[dec!(0.010), dec!(0.012), dec!(-0.003)]);
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TABLE.as_bytes()).unwrap();
    let perf = CsvPerformance::from_path(file.path()).unwrap();
    let s = perf.fetch_portfolio_performance("MSCI_WORLD").unwrap();
    assert_eq!(s.len(), 3);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CsvPerformance::from_path(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, ReportError::Io(_)));
    assert!(err.to_string().contains("nope.csv"));
}

// ---------------------------------------------------------------------------
// Lookup failures
// ---------------------------------------------------------------------------

#[test]
fn test_missing_name_is_not_found() {
    let perf = CsvPerformance::from_reader(TABLE.as_bytes()).unwrap();
    let err = perf.fetch_portfolio_performance("BONDS").unwrap_err();
    assert!(matches!(err, ReportError::NotFound { ref name } if name == "BONDS"));
    assert_eq!(err.to_string(), "Missing performance for BONDS");
}

#[test]
fn test_name_lookup_is_exact() {
    let perf = CsvPerformance::from_reader(TABLE.as_bytes()).unwrap();
    assert!(perf.fetch_portfolio_performance("growth").is_err());
    assert!(perf.fetch_portfolio_performance("date").is_err());
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_dates_rejected() {
    let csv = "date,P\n2024-01-02,0.01\n2024-01-02,0.02\n";
    let err = CsvPerformance::from_reader(csv.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("duplicate date 2024-01-02"));
}

#[test]
fn test_unparseable_value_rejected() {
    let csv = "date,P\n2024-01-02,abc\n";
    let err = CsvPerformance::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ReportError::InvalidInput { ref field, .. } if field == "P"));
}

#[test]
fn test_bad_date_rejected() {
    let csv = "date,P\nyesterday,0.01\n";
    let err = CsvPerformance::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ReportError::DateError(_)));
}

#[test]
fn test_ragged_row_rejected() {
    let csv = "date,P,B\n2024-01-02,0.01\n";
    let err = CsvPerformance::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ReportError::Csv(_)));
}

#[test]
fn test_header_without_series_rejected() {
    let csv = "date\n2024-01-02\n";
    assert!(CsvPerformance::from_reader(csv.as_bytes()).is_err());
}

#[test]
fn test_empty_cell_fails_only_for_requested_series() {
    let csv = "date,P,B\n2024-01-02,0.01,\n2024-01-03,0.02,0.01\n";
    let perf = CsvPerformance::from_reader(csv.as_bytes()).unwrap();
    assert!(perf.fetch_portfolio_performance("P").is_ok());
    let err = perf.fetch_portfolio_performance("B").unwrap_err();
    assert!(err.to_string().contains("missing return on 2024-01-02"));
}

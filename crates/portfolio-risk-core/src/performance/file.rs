use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::PerformanceSource;
use crate::error::ReportError;
use crate::types::*;
use crate::ReportResult;

/// One named column of the performance table; `None` marks an empty cell.
#[derive(Debug, Clone)]
struct Column {
    name: String,
    values: Vec<Option<Rate>>,
}

/// Return table loaded from CSV: a date index column followed by one column
/// of fractional returns per tradable name.
#[derive(Debug, Clone)]
pub struct CsvPerformance {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl CsvPerformance {
    /// Load the table from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ReportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read '{}': {}", path.display(), e),
            ))
        })?;
        let table = Self::from_reader(file)?;
        debug!(
            "loaded performance table from '{}': {} rows, {} series",
            path.display(),
            table.dates.len(),
            table.columns.len()
        );
        Ok(table)
    }

    /// Load the table from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R) -> ReportResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.len() < 2 {
            return Err(ReportError::InvalidInput {
                field: "header".into(),
                reason: "expected a date column followed by at least one series column".into(),
            });
        }

        let mut seen = HashSet::new();
        let mut columns: Vec<Column> = Vec::with_capacity(headers.len() - 1);
        for name in headers.iter().skip(1) {
            if !seen.insert(name) {
                return Err(ReportError::InvalidInput {
                    field: name.to_string(),
                    reason: "series column appears more than once".into(),
                });
            }
            columns.push(Column {
                name: name.to_string(),
                values: Vec::new(),
            });
        }

        let mut dates = Vec::new();
        let mut seen_dates = HashSet::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            // header is line 1
            let line = row + 2;
            let date = parse_date(record.get(0).unwrap_or_default(), line)?;
            if !seen_dates.insert(date) {
                return Err(ReportError::InvalidInput {
                    field: "date".into(),
                    reason: format!("duplicate date {} on line {}", date, line),
                });
            }
            dates.push(date);

            for (column, cell) in columns.iter_mut().zip(record.iter().skip(1)) {
                let value = parse_return(cell).map_err(|reason| ReportError::InvalidInput {
                    field: column.name.clone(),
                    reason: format!("{} on {}", reason, date),
                })?;
                column.values.push(value);
            }
        }

        Ok(Self { dates, columns })
    }

    /// Names of all series in the table, in column order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of dated rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl PerformanceSource for CsvPerformance {
    fn fetch_portfolio_performance(&self, name: &str) -> ReportResult<ReturnSeries> {
        let column = self
            .columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ReportError::NotFound {
                name: name.to_string(),
            })?;

        let values = column
            .values
            .iter()
            .zip(&self.dates)
            .map(|(v, date)| {
                v.ok_or_else(|| ReportError::InvalidInput {
                    field: name.to_string(),
                    reason: format!("missing return on {}", date),
                })
            })
            .collect::<ReportResult<Vec<Rate>>>()?;

        ReturnSeries::new(name, self.dates.clone(), values)
    }
}

fn parse_date(raw: &str, line: usize) -> ReportResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| ReportError::DateError(format!("unrecognised date '{}' on line {}", raw, line)))
}

/// Empty cells are `None`; accepts plain and scientific notation.
fn parse_return(raw: &str) -> Result<Option<Rate>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map(Some)
        .map_err(|_| format!("'{}' is not a number", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_return_formats() {
        assert_eq!(parse_return("0.015").unwrap(), Some(dec!(0.015)));
        assert_eq!(parse_return("-2.5e-3").unwrap(), Some(dec!(-0.0025)));
        assert_eq!(parse_return("").unwrap(), None);
        assert!(parse_return("n/a").is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date("2024-03-01", 2).unwrap(), expected);
        assert_eq!(parse_date("2024-03-01 00:00:00", 2).unwrap(), expected);
        let err = parse_date("01/03/2024", 7).unwrap_err();
        assert!(err.to_string().contains("line 7"));
    }
}

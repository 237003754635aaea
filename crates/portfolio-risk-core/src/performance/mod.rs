pub mod file;

pub use file::CsvPerformance;

use crate::types::ReturnSeries;
use crate::ReportResult;

/// Default location of the performance table, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "performance/perf.csv";

/// A store of named return series.
pub trait PerformanceSource {
    /// Return series for `name`.
    ///
    /// Fails with [`crate::ReportError::NotFound`] when the source has no
    /// series of that name.
    fn fetch_portfolio_performance(&self, name: &str) -> ReportResult<ReturnSeries>;
}

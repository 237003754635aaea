pub mod error;
pub mod performance;
pub mod report;
pub mod risk;
pub mod types;

pub use error::ReportError;
pub use types::*;

/// Standard result type for all portfolio-risk operations
pub type ReportResult<T> = Result<T, ReportError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Missing performance for {name}")]
    NotFound { name: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Page '{page}' requires a benchmark series")]
    MissingBenchmark { page: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::SerializationError(e.to_string())
    }
}

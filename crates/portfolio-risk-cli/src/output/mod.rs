pub mod csv_out;
pub mod minimal;
pub mod table;

use portfolio_risk_core::risk::MetricsTable;
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch the metrics summary to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pull the metrics table out of a computation envelope.
fn metrics_table(value: &Value) -> Option<MetricsTable> {
    value
        .get("result")
        .and_then(|r| serde_json::from_value(r.clone()).ok())
}

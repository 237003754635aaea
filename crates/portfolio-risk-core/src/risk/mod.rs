pub mod metrics;
pub mod table;

pub use metrics::{metrics, tracking_error, MetricsRecord, TRADING_DAYS};
pub use table::{metrics_table, summarize, MetricsRow, MetricsTable};

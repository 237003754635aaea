use serde_json::Value;
use std::io;

use super::metrics_table;

/// Write the metrics summary as CSV to stdout: one row per metric, one
/// column per series.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match metrics_table(value) {
        Some(table) => {
            let mut header = vec!["metric".to_string()];
            header.extend(table.columns.iter().cloned());
            let _ = wtr.write_record(&header);
            for row in &table.rows {
                let mut record = vec![row.label.clone()];
                record.extend(row.cells.iter().cloned());
                let _ = wtr.write_record(&record);
            }
        }
        None => {
            let _ = wtr.write_record([value.to_string()]);
        }
    }

    let _ = wtr.flush();
}

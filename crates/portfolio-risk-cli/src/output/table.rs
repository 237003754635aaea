use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::metrics_table;

/// Format the metrics summary as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let Some(table) = metrics_table(value) else {
        println!("{}", value);
        return;
    };

    let mut builder = Builder::default();
    let mut header = vec![String::new()];
    header.extend(table.columns.iter().cloned());
    builder.push_record(header);
    for row in &table.rows {
        let mut record = vec![row.label.clone()];
        record.extend(row.cells.iter().cloned());
        builder.push_record(record);
    }
    println!("{}", Table::from(builder));

    // Print warnings if any
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

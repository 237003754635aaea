use serde_json::Value;

use super::metrics_table;

/// Print the portfolio column on one line: name followed by its cells.
pub fn print_minimal(value: &Value) {
    match metrics_table(value) {
        Some(table) => {
            let name = table.columns.first().cloned().unwrap_or_default();
            let cells: Vec<&str> = table
                .rows
                .iter()
                .filter_map(|r| r.cells.first().map(String::as_str))
                .collect();
            println!("{} {}", name, cells.join(" "));
        }
        None => println!("{}", value),
    }
}

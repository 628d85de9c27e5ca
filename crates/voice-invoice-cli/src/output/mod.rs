pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar for a table cell or CSV field.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// The first array of row objects in the result, if any: per-invoice rows
/// for a batch, summary lines for a preview.
pub(crate) fn row_array(value: &Value) -> Option<&Vec<Value>> {
    let result = value.get("result").unwrap_or(value);
    ["per_invoice", "summary"].iter().find_map(|key| {
        result
            .get(*key)
            .or_else(|| value.get(*key))
            .and_then(Value::as_array)
    })
}

use serde_json::Value;

use super::cell;

/// Print just the headline figure.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // What a caller most likely wants from each command
    let priority_keys = [
        "invoice_total",
        "amount_due",
        "total_invoiced",
        "formatted",
        "valid",
        "labour_rate",
    ];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", cell(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, cell(val));
            return;
        }
    }

    println!("{}", cell(result));
}

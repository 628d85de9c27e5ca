use serde_json::Value;
use std::io;

use super::{cell, row_array};

/// Write output as CSV to stdout: one row per invoice (or summary line) when
/// the result has rows, otherwise `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = row_array(value) {
        write_rows(&mut wtr, rows);
    } else {
        let result = value.get("result").unwrap_or(value);
        let _ = wtr.write_record(["field", "value"]);
        if let Value::Object(map) = result {
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &cell(val)]);
            }
        } else {
            let _ = wtr.write_record(["value", &cell(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(cell).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

use serde_json::{Map, Value};

use super::plain;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    match render_csv(value) {
        Ok(text) => print!("{}", text),
        Err(e) => eprintln!("CSV serialization error: {}", e),
    }
}

/// Render a command result as CSV.
///
/// Arrays become one record per element. Objects become `field,value` pairs
/// with nested keys joined by a dot; arrays nested inside an object are
/// written as separate blocks introduced by a one-cell section record.
pub fn render_csv(value: &Value) -> Result<String, Box<dyn std::error::Error>> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let body = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => result,
            _ => map,
        },
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr)?;
            return finish(wtr);
        }
        _ => {
            wtr.write_record([plain(value)])?;
            return finish(wtr);
        }
    };

    let mut fields = Vec::new();
    flatten("", body, &mut fields);
    if !fields.is_empty() {
        wtr.write_record(["field", "value"])?;
        for (key, val) in &fields {
            wtr.write_record([key.as_str(), val.as_str()])?;
        }
    }

    for (key, val) in body {
        if let Value::Array(arr) = val {
            wtr.write_record([""])?;
            wtr.write_record([key.as_str()])?;
            write_array_csv(&mut wtr, arr)?;
        }
    }

    finish(wtr)
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = wtr.into_inner().map_err(|e| e.to_string())?;
    Ok(String::from_utf8(bytes)?)
}

/// Collect scalar leaves of `map` as (dotted key, text), skipping arrays.
fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => flatten(&full, inner, out),
            Value::Array(_) => {}
            other => out.push((full, plain(other))),
        }
    }
}

fn write_array_csv(
    wtr: &mut csv::Writer<Vec<u8>>,
    arr: &[Value],
) -> Result<(), Box<dyn std::error::Error>> {
    if arr.is_empty() {
        return Ok(());
    }

    // Extract headers from first object
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(plain).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in arr {
            wtr.write_record([plain(item)])?;
        }
    }
    Ok(())
}

use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::plain;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    print!("{}", render_table(value));
}

/// Render a command result as text tables.
///
/// A report envelope renders one titled table per section, followed by its
/// warnings; a bare object or array renders as a single table.
pub fn render_table(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                render_sections(&mut out, result);
                render_envelope_notes(&mut out, map);
            }
            _ => render_sections(&mut out, map),
        },
        Value::Array(arr) => out.push_str(&array_table(arr)),
        _ => {
            out.push_str(&plain(value));
            out.push('\n');
        }
    }
    out
}

/// Scalars are gathered into one Field/Value table; nested objects and arrays
/// each get their own titled table.
fn render_sections(out: &mut String, map: &Map<String, Value>) {
    let scalars: Vec<(&String, &Value)> = map
        .iter()
        .filter(|(_, v)| !v.is_object() && !v.is_array())
        .collect();
    if !scalars.is_empty() {
        out.push_str(&field_value_table(scalars));
    }

    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                out.push_str(&format!("\n{}\n", title(key)));
                out.push_str(&field_value_table(inner.iter().collect()));
            }
            Value::Array(arr) => {
                out.push_str(&format!("\n{}\n", title(key)));
                out.push_str(&array_table(arr));
            }
            _ => {}
        }
    }
}

fn render_envelope_notes(out: &mut String, envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            out.push_str("\nWarnings:\n");
            for w in warnings {
                if let Value::String(s) = w {
                    out.push_str(&format!("  - {}\n", s));
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        out.push_str(&format!("\nMethodology: {}\n", meth));
    }
}

/// `daily_sales` → `Daily sales`
fn title(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn field_value_table(fields: Vec<(&String, &Value)>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    format!("{}\n", Table::from(builder))
}

fn array_table(arr: &[Value]) -> String {
    if arr.is_empty() {
        return "(empty)\n".to_string();
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        format!("{}\n", Table::from(builder))
    } else {
        arr.iter().map(|item| format!("{}\n", format_value(item))).collect()
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        other => plain(other),
    }
}

use serde_json::Value;

use super::plain;

/// Headline fields, most important first.
const PRIORITY_KEYS: [&str; 5] = [
    "paid_amount",
    "total_units",
    "total_due_display",
    "amount_paid_display",
    "amount",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", render_minimal(value));
}

/// Heuristic: look inside the "result" envelope and its "cards" section for
/// well-known headline fields, then fall back to the first field. Arrays
/// render one line per element.
pub fn render_minimal(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            let headline_map = match map.get("cards") {
                Some(Value::Object(cards)) => cards,
                _ => map,
            };
            for key in &PRIORITY_KEYS {
                if let Some(val) = headline_map.get(*key) {
                    if !val.is_null() {
                        return plain(val);
                    }
                }
            }
            match map.iter().next() {
                Some((key, val)) => format!("{}: {}", key, plain(val)),
                None => String::new(),
            }
        }
        Value::Array(arr) => arr
            .iter()
            .map(|item| match item {
                Value::Object(map) => map.values().map(plain).collect::<Vec<_>>().join("\t"),
                other => plain(other),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => plain(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_headline_is_paid_amount_card() {
        let value = json!({
            "result": {
                "summary": { "paid_amount": "700.50" },
                "cards": { "total_units": "24", "paid_amount": "R$ 700,50" }
            }
        });
        assert_eq!(render_minimal(&value), "R$ 700,50");
    }

    #[test]
    fn test_rows_render_one_line_each() {
        let value = json!([
            { "customer": "Bruno", "total_due_display": "R$ 6.050,00" },
            { "customer": "Davi", "total_due_display": "R$ 1.000,00" }
        ]);
        assert_eq!(
            render_minimal(&value),
            "Bruno\tR$ 6.050,00\nDavi\tR$ 1.000,00"
        );
    }
}

use serde_json::Value;

use super::{domain_label, result_of};

/// Fields that answer "should we build it?", most decisive first.
const PRIORITY_KEYS: [&str; 7] = [
    "decision",
    "irr_annual",
    "npv",
    "payback",
    "irr_change",
    "display",
    "tcv_total",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    // Site appraisals nest the verdict one level down
    let result = match result.get("site") {
        Some(site @ Value::Object(_)) if result.get("decision").is_none() => site,
        _ => result,
    };

    if let Value::Object(map) = result {
        let mut parts = Vec::new();
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                parts.push(format_minimal(val));
                if parts.len() == 2 {
                    break;
                }
            }
        }
        if !parts.is_empty() {
            println!("{}", parts.join(" "));
            return;
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result));
}

fn format_minimal(value: &Value) -> String {
    if let Some(label) = domain_label(value) {
        return label;
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

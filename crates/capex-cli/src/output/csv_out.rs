use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::io;
use std::str::FromStr;

use super::{domain_label, result_of};

type CsvWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Per-site results become one row per site; anything carrying a monthly
/// timeline becomes one row per month with a running cumulative column.
/// Other results fall back to field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let outcome = match result_of(value) {
        Value::Object(result) => write_result(&mut wtr, result),
        Value::Array(arr) => write_rows(&mut wtr, arr),
        other => wtr.write_record([format_csv_value(other)]),
    };
    if let Err(e) = outcome.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        log::error!("CSV write error: {}", e);
    }
}

fn write_result(wtr: &mut CsvWriter<'_>, result: &Map<String, Value>) -> csv::Result<()> {
    if let Some(Value::Array(sites)) = result.get("sites") {
        return write_rows(wtr, sites);
    }
    for key in ["timeline", "combined_timeline"] {
        if let Some(Value::Array(months)) = result.get(key) {
            return write_timeline(wtr, months);
        }
    }
    wtr.write_record(["field", "value"])?;
    for (key, val) in result {
        wtr.write_record([key.as_str(), &format_csv_value(val)])?;
    }
    Ok(())
}

fn write_timeline(wtr: &mut CsvWriter<'_>, months: &[Value]) -> csv::Result<()> {
    wtr.write_record(["month", "net_cash_flow", "cumulative"])?;
    let mut cumulative = Decimal::ZERO;
    for (month, cf) in months.iter().enumerate() {
        let text = format_csv_value(cf);
        cumulative += Decimal::from_str(&text).unwrap_or(Decimal::ZERO);
        wtr.write_record([month.to_string(), text, cumulative.to_string()])?;
    }
    Ok(())
}

fn write_rows(wtr: &mut CsvWriter<'_>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([format_csv_value(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for item in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(*h).map(format_csv_value).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    if let Some(label) = domain_label(value) {
        return label;
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

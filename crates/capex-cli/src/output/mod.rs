pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use capex_core::payback::Payback;
use capex_core::types::IrrResult;
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Human label for values the engine serializes as objects: IRR outcomes
/// ("12.34%", "Infinite", "N/A") and payback periods ("34 Months", "Never").
pub(crate) fn domain_label(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    if map.contains_key("status") {
        return serde_json::from_value::<IrrResult>(value.clone())
            .ok()
            .map(|irr| irr.to_string());
    }
    if map.contains_key("recovered") {
        return serde_json::from_value::<Payback>(value.clone())
            .ok()
            .map(|p| p.to_string());
    }
    None
}

/// The object that holds the answer: the `result` of an envelope, or the
/// value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

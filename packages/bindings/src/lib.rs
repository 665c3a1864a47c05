use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use capex_core::form::{RawLocationForm, RawSiteForm};
use capex_core::types::{IrrStrategy, Timeline};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: for<'de> Deserialize<'de>>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn parse_decimal(text: &str) -> NapiResult<Decimal> {
    text.trim().parse::<Decimal>().map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn appraise_site(input_json: String) -> NapiResult<String> {
    let input: capex_core::project::site::SiteAppraisalInput = parse(&input_json)?;
    let output = capex_core::project::site::appraise_site(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn aggregate_project(input_json: String) -> NapiResult<String> {
    let input: capex_core::project::ProjectInput = parse(&input_json)?;
    let output = capex_core::project::aggregate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn evaluate_business_case(input_json: String) -> NapiResult<String> {
    let input: capex_core::project::business_case::BusinessCaseInput = parse(&input_json)?;
    let output = capex_core::project::business_case::evaluate_business_case(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn stress_project(input_json: String) -> NapiResult<String> {
    let input: capex_core::project::stress::StressInput = parse(&input_json)?;
    let output = capex_core::project::stress::stress_project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form text
// ---------------------------------------------------------------------------

/// Payload of the uniform-start form: raw text per site card.
#[derive(Deserialize)]
struct SiteFormPayload {
    sites: Vec<RawSiteForm>,
    #[serde(default)]
    target_irr_percent: String,
    #[serde(default)]
    strategy: IrrStrategy,
}

/// Payload of the flexible-start form: raw text per location card.
#[derive(Deserialize)]
struct LocationFormPayload {
    locations: Vec<RawLocationForm>,
    #[serde(default)]
    discount_rate_percent: String,
}

/// Aggregate a project straight from form text; unreadable fields are zero.
#[napi]
pub fn aggregate_form(input_json: String) -> NapiResult<String> {
    let payload: SiteFormPayload = parse(&input_json)?;
    let input = capex_core::project::ProjectInput {
        sites: payload.sites.iter().map(RawSiteForm::to_site).collect(),
        target_irr: capex_core::form::parse_percent(&payload.target_irr_percent),
        strategy: payload.strategy,
    };
    let output = capex_core::project::aggregate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Business case straight from form text; unreadable fields are zero.
#[napi]
pub fn business_case_form(input_json: String) -> NapiResult<String> {
    let payload: LocationFormPayload = parse(&input_json)?;
    let input = capex_core::project::business_case::BusinessCaseInput {
        locations: payload.locations.iter().map(RawLocationForm::to_location).collect(),
        discount_rate: capex_core::form::parse_percent(&payload.discount_rate_percent),
    };
    let output = capex_core::project::business_case::evaluate_business_case(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Cash-flow primitives
// ---------------------------------------------------------------------------

#[napi]
pub fn npv(cash_flows_json: String, annual_rate: String) -> NapiResult<String> {
    let timeline: Timeline = parse(&cash_flows_json)?;
    let rate = parse_decimal(&annual_rate)?;
    let value = capex_core::time_value::npv(timeline.as_slice(), rate).map_err(to_napi_error)?;
    Ok(value.to_string())
}

/// Annualized IRR of a monthly timeline, serialized as an `IrrResult`.
#[napi]
pub fn irr(cash_flows_json: String, strategy: Option<String>) -> NapiResult<String> {
    let timeline: Timeline = parse(&cash_flows_json)?;
    let strategy: IrrStrategy = match strategy {
        Some(s) => serde_json::from_value(serde_json::Value::String(s)).map_err(to_napi_error)?,
        None => IrrStrategy::default(),
    };
    let monthly = capex_core::irr::solve_irr(timeline.as_slice(), strategy);
    let annual = capex_core::time_value::annualize(monthly);
    serde_json::to_string(&annual).map_err(to_napi_error)
}

#[napi]
pub fn payback(cash_flows_json: String) -> NapiResult<String> {
    let timeline: Timeline = parse(&cash_flows_json)?;
    let result = capex_core::payback::payback(timeline.as_slice());
    serde_json::to_string(&result).map_err(to_napi_error)
}

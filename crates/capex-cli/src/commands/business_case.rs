use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use capex_core::project::business_case::{self, BusinessCaseInput};

use crate::input;

/// Arguments for the flexible-start business case
#[derive(Args)]
pub struct BusinessCaseArgs {
    /// Path to JSON/YAML file with `locations` and `discount_rate`
    #[arg(long)]
    pub input: Option<String>,

    /// Override the file's annual discount rate (0.10 = 10%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,
}

pub fn run_business_case(args: BusinessCaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut case_input: BusinessCaseInput = input::load(args.input.as_deref())?
        .ok_or("--input <locations.json> or stdin required for business case")?;

    if let Some(rate) = args.discount_rate {
        case_input.discount_rate = rate;
    }

    let result = business_case::evaluate_business_case(&case_input)?;
    Ok(serde_json::to_value(result)?)
}

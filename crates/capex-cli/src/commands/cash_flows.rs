use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use capex_core::irr::solve_irr;
use capex_core::payback::payback;
use capex_core::time_value::{annualize, npv};
use capex_core::types::{IrrStrategy, Timeline};

use super::StrategyArg;

/// Monthly cash flows given on the command line
#[derive(Args)]
pub struct CashFlowArgs {
    /// Monthly cash flows, month 0 first (comma-separated, e.g. "-1000,100,100")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub cash_flows: Vec<Decimal>,
}

impl CashFlowArgs {
    fn timeline(&self) -> Result<Timeline, Box<dyn std::error::Error>> {
        Ok(Timeline::new(self.cash_flows.clone())?)
    }
}

/// Arguments for NPV
#[derive(Args)]
pub struct NpvArgs {
    #[command(flatten)]
    pub flows: CashFlowArgs,

    /// Annual discount rate (0.10 = 10%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Decimal,
}

pub fn run_npv(args: NpvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let timeline = args.flows.timeline()?;
    let value = npv(timeline.as_slice(), args.rate)?;
    Ok(json!({
        "npv": value,
        "discount_rate": args.rate,
        "months": timeline.last_month(),
    }))
}

/// Arguments for IRR
#[derive(Args)]
pub struct IrrArgs {
    #[command(flatten)]
    pub flows: CashFlowArgs,

    /// IRR solver
    #[arg(long, value_enum, default_value = "newton")]
    pub strategy: StrategyArg,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let timeline = args.flows.timeline()?;
    let strategy: IrrStrategy = args.strategy.into();
    let monthly = solve_irr(timeline.as_slice(), strategy);
    let annual = annualize(monthly);
    Ok(json!({
        "irr_annual": annual,
        "irr_monthly": monthly,
        "display": annual.to_string(),
        "strategy": strategy,
    }))
}

/// Arguments for payback
#[derive(Args)]
pub struct PaybackArgs {
    #[command(flatten)]
    pub flows: CashFlowArgs,
}

pub fn run_payback(args: PaybackArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let timeline = args.flows.timeline()?;
    let result = payback(timeline.as_slice());
    Ok(json!({
        "payback": result,
        "display": result.to_string(),
    }))
}

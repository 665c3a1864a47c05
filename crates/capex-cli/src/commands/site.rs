use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use capex_core::project::site::{self, SiteAppraisalInput};
use capex_core::timeline::SiteInput;
use capex_core::types::IrrStrategy;

use super::StrategyArg;
use crate::input;

/// Arguments for the single-site calculator
#[derive(Args)]
pub struct SiteArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Site name
    #[arg(long, default_value = "")]
    pub name: String,

    /// One-time capital cost (construction + engineering)
    #[arg(long)]
    pub upfront_cost: Option<Decimal>,

    /// One-time revenue (NRR) at month 0
    #[arg(long, default_value = "0")]
    pub upfront_credit: Decimal,

    /// Monthly recurring revenue (MRR)
    #[arg(long)]
    pub monthly_revenue: Option<Decimal>,

    /// Monthly recurring cost
    #[arg(long, default_value = "0")]
    pub monthly_cost: Decimal,

    /// Term in months
    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<i64>,

    /// Annual target IRR as a decimal (0.15 = 15%); 0 when omitted
    #[arg(long, allow_hyphen_values = true)]
    pub target_irr: Option<Decimal>,

    /// IRR solver (newton when omitted)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

pub fn run_site(args: SiteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut appraisal_input: SiteAppraisalInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let upfront_cost = args
                .upfront_cost
                .ok_or("--upfront-cost is required (or provide --input)")?;
            let monthly_revenue = args
                .monthly_revenue
                .ok_or("--monthly-revenue is required (or provide --input)")?;
            let term = args.term.ok_or("--term is required (or provide --input)")?;

            SiteAppraisalInput {
                site: SiteInput {
                    name: args.name,
                    upfront_cost,
                    upfront_credit: args.upfront_credit,
                    monthly_revenue,
                    monthly_cost: args.monthly_cost,
                    term,
                },
                target_irr: Decimal::ZERO,
                strategy: IrrStrategy::default(),
            }
        }
    };

    if let Some(target) = args.target_irr {
        appraisal_input.target_irr = target;
    }
    if let Some(strategy) = args.strategy {
        appraisal_input.strategy = strategy.into();
    }

    let result = site::appraise_site(&appraisal_input)?;
    Ok(serde_json::to_value(result)?)
}

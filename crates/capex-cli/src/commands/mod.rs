pub mod business_case;
pub mod cash_flows;
pub mod project;
pub mod site;
pub mod stress;

use capex_core::types::IrrStrategy;
use clap::ValueEnum;

/// IRR root-finding method selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Newton,
    Bisection,
    Bracketed,
}

impl From<StrategyArg> for IrrStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Newton => IrrStrategy::NewtonRaphson,
            StrategyArg::Bisection => IrrStrategy::Bisection,
            StrategyArg::Bracketed => IrrStrategy::BracketedBisection,
        }
    }
}

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use capex_core::project::{self, ProjectInput};

use super::StrategyArg;
use crate::input;

/// Arguments for multi-site project aggregation
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON/YAML project file with `sites` and `target_irr`
    #[arg(long)]
    pub input: Option<String>,

    /// Override the file's annual target IRR (0.15 = 15%)
    #[arg(long)]
    pub target_irr: Option<Decimal>,

    /// Override the file's IRR solver
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut project_input: ProjectInput = input::load(args.input.as_deref())?
        .ok_or("--input <project.json> or stdin required for project aggregation")?;

    if let Some(target) = args.target_irr {
        project_input.target_irr = target;
    }
    if let Some(strategy) = args.strategy {
        project_input.strategy = strategy.into();
    }

    let result = project::aggregate(&project_input)?;
    Ok(serde_json::to_value(result)?)
}

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use capex_core::project::stress::{self, StressInput};
use capex_core::project::ProjectInput;

use crate::input;

/// Arguments for the CapEx / MRR stress test
#[derive(Args)]
pub struct StressArgs {
    /// Path to JSON/YAML project file
    #[arg(long)]
    pub input: Option<String>,

    /// Relative CapEx shift, -0.2 to 0.2
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub capex: Decimal,

    /// Relative MRR shift, -0.2 to 0.2
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub mrr: Decimal,
}

pub fn run_stress(args: StressArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let project: ProjectInput = input::load(args.input.as_deref())?
        .ok_or("--input <project.json> or stdin required for stress test")?;

    let stress_input = StressInput {
        project,
        capex_stress: args.capex,
        mrr_stress: args.mrr,
    };
    let result = stress::stress_project(&stress_input)?;
    Ok(serde_json::to_value(result)?)
}

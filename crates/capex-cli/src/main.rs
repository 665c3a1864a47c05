mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::business_case::BusinessCaseArgs;
use commands::cash_flows::{IrrArgs, NpvArgs, PaybackArgs};
use commands::project::ProjectArgs;
use commands::site::SiteArgs;
use commands::stress::StressArgs;

/// Capital expenditure appraisal: NPV, IRR, payback and GO / NO GO
#[derive(Parser)]
#[command(
    name = "capex",
    version,
    about = "Capital expenditure appraisal for telecom build-outs",
    long_about = "Evaluates whether a capital project is worth building. Builds monthly \
                  cash-flow timelines from site or location inputs and reports NPV, \
                  annualized IRR, payback and a GO / NO GO decision against a hurdle rate. \
                  Inputs come from flags, a JSON/YAML --input file, or stdin. \
                  Set RUST_LOG=debug to trace solver decisions."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Appraise a single site with uniform timing
    Site(SiteArgs),
    /// Aggregate several sites into one project decision
    Project(ProjectArgs),
    /// Evaluate locations with staggered construction and billing starts
    BusinessCase(BusinessCaseArgs),
    /// Net present value of monthly cash flows at an annual rate
    Npv(NpvArgs),
    /// Annualized internal rate of return of monthly cash flows
    Irr(IrrArgs),
    /// Months until cumulative inflows recover the investment
    Payback(PaybackArgs),
    /// Re-run a project with CapEx and MRR shifted by up to 20%
    Stress(StressArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Site(args) => commands::site::run_site(args),
        Commands::Project(args) => commands::project::run_project(args),
        Commands::BusinessCase(args) => commands::business_case::run_business_case(args),
        Commands::Npv(args) => commands::cash_flows::run_npv(args),
        Commands::Irr(args) => commands::cash_flows::run_irr(args),
        Commands::Payback(args) => commands::cash_flows::run_payback(args),
        Commands::Stress(args) => commands::stress::run_stress(args),
        Commands::Version => {
            println!("capex {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::irr::solve_irr;
use crate::payback::{payback, Payback};
use crate::time_value::annualize;
use crate::timeline::{uniform_timeline, SiteInput};
use crate::types::*;
use crate::CapexResult;

use super::decision::decide;

/// Derived appraisal of one site. Recomputed in full from its input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteResult {
    pub name: String,
    pub irr_annual: IrrResult,
    pub tcv: Money,
    pub decision: Decision,
    pub is_valid: bool,
    /// Validation failure, when `is_valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SiteResult {
    fn invalid(name: &str, reason: String) -> Self {
        SiteResult {
            name: name.to_string(),
            irr_annual: IrrResult::Undefined,
            tcv: Decimal::ZERO,
            decision: Decision::Error,
            is_valid: false,
            error: Some(reason),
        }
    }
}

/// Appraise one site against an annual hurdle rate.
///
/// Never fails: invalid input yields a result flagged `is_valid = false`
/// with decision `Error`, so one bad site cannot halt a project.
pub fn evaluate_site(site: &SiteInput, target_annual: Rate, strategy: IrrStrategy) -> SiteResult {
    uniform_timeline(site)
        .and_then(|timeline| site_result(site, &timeline, target_annual, strategy))
        .unwrap_or_else(|e| SiteResult::invalid(&site.name, e.to_string()))
}

fn site_result(
    site: &SiteInput,
    timeline: &Timeline,
    target_annual: Rate,
    strategy: IrrStrategy,
) -> CapexResult<SiteResult> {
    let irr_annual = annualize(solve_irr(timeline.as_slice(), strategy));
    Ok(SiteResult {
        name: site.name.clone(),
        irr_annual,
        tcv: site.tcv()?,
        decision: decide(&irr_annual, target_annual),
        is_valid: true,
        error: None,
    })
}

/// Input for the single-site calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteAppraisalInput {
    #[serde(flatten)]
    pub site: SiteInput,
    /// Annual hurdle rate (0.15 = 15%).
    pub target_irr: Rate,
    #[serde(default)]
    pub strategy: IrrStrategy,
}

/// Single-site appraisal with its timeline and payback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteAppraisal {
    pub site: SiteResult,
    pub timeline: Timeline,
    pub payback: Payback,
}

/// Single-site calculator: validates strictly, then appraises.
pub fn appraise_site(
    input: &SiteAppraisalInput,
) -> CapexResult<ComputationOutput<SiteAppraisal>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let timeline = uniform_timeline(&input.site)?;
    let result = site_result(&input.site, &timeline, input.target_irr, input.strategy)?;

    match result.irr_annual {
        IrrResult::NonConvergent => {
            warnings.push("IRR solver did not converge; rate shown as 0%".into())
        }
        IrrResult::Unbounded if input.site.net_upfront() >= Decimal::ZERO => warnings.push(
            "No net investment at month 0 and no negative monthly flow; IRR is unbounded".into(),
        ),
        _ => {}
    }

    let output = SiteAppraisal {
        payback: payback(timeline.as_slice()),
        site: result,
        timeline,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Uniform-start site appraisal: monthly IRR annualized, TCV, GO / NO GO",
        &serde_json::json!({
            "target_irr": input.target_irr.to_string(),
            "strategy": input.strategy,
            "term_months": input.site.term,
        }),
        warnings,
        elapsed,
        output,
    ))
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CapexError;
use crate::types::*;
use crate::CapexResult;

use super::aggregate::{aggregate, ProjectAggregate, ProjectInput};

/// Largest shift either stress lever accepts (±20%).
const MAX_STRESS: Decimal = dec!(0.20);

/// Input for a CapEx / MRR stress test of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressInput {
    #[serde(flatten)]
    pub project: ProjectInput,
    /// Relative shift applied to every site's upfront cost (-0.2 ..= 0.2).
    #[serde(default)]
    pub capex_stress: Rate,
    /// Relative shift applied to every site's monthly revenue (-0.2 ..= 0.2).
    #[serde(default)]
    pub mrr_stress: Rate,
}

/// Headline figures of one project run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub irr_annual: IrrResult,
    pub decision: Decision,
    pub tcv_total: Money,
}

impl From<&ProjectAggregate> for ProjectSummary {
    fn from(p: &ProjectAggregate) -> Self {
        ProjectSummary {
            irr_annual: p.irr_annual,
            decision: p.decision,
            tcv_total: p.tcv_total,
        }
    }
}

/// Baseline and stressed project side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressOutput {
    pub capex_stress: Rate,
    pub mrr_stress: Rate,
    pub baseline: ProjectSummary,
    pub stressed: ProjectSummary,
    /// Stressed minus baseline annual IRR, when both are finite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr_change: Option<Rate>,
    pub decision_changed: bool,
}

fn check_stress(field: &str, value: Rate) -> CapexResult<()> {
    if value.abs() > MAX_STRESS {
        return Err(CapexError::InvalidInput {
            field: field.into(),
            reason: "Stress must be between -20% and +20%".into(),
        });
    }
    Ok(())
}

fn scale(field: &str, amount: Money, stress: Rate) -> CapexResult<Money> {
    amount
        .checked_mul(Decimal::ONE + stress)
        .ok_or_else(|| CapexError::InvalidInput {
            field: field.into(),
            reason: format!("Stressed value of {amount} exceeds the representable range"),
        })
}

/// Re-run a project with upfront costs scaled by `1 + capex_stress` and
/// monthly revenue by `1 + mrr_stress`.
pub fn stress_project(input: &StressInput) -> CapexResult<ComputationOutput<StressOutput>> {
    let start = Instant::now();
    check_stress("capex_stress", input.capex_stress)?;
    check_stress("mrr_stress", input.mrr_stress)?;

    let baseline = aggregate(&input.project)?;

    let mut stressed_project = input.project.clone();
    for site in &mut stressed_project.sites {
        site.upfront_cost = scale("capex_stress", site.upfront_cost, input.capex_stress)?;
        site.monthly_revenue = scale("mrr_stress", site.monthly_revenue, input.mrr_stress)?;
    }
    let stressed = aggregate(&stressed_project)?;

    let baseline_summary = ProjectSummary::from(&baseline.result);
    let stressed_summary = ProjectSummary::from(&stressed.result);
    let irr_change = match (
        baseline_summary.irr_annual.rate(),
        stressed_summary.irr_annual.rate(),
    ) {
        (Some(b), Some(s)) => Some(s - b),
        _ => None,
    };

    let mut warnings = baseline.warnings;
    warnings.extend(stressed.warnings.into_iter().map(|w| format!("stressed: {w}")));

    let output = StressOutput {
        capex_stress: input.capex_stress,
        mrr_stress: input.mrr_stress,
        decision_changed: baseline_summary.decision != stressed_summary.decision,
        baseline: baseline_summary,
        stressed: stressed_summary,
        irr_change,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Stress test: CapEx and MRR shifted within ±20%, project re-aggregated",
        &serde_json::json!({
            "capex_stress": input.capex_stress.to_string(),
            "mrr_stress": input.mrr_stress.to_string(),
            "target_irr": input.project.target_irr.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::SiteInput;

    fn project() -> ProjectInput {
        ProjectInput {
            sites: vec![SiteInput {
                name: "Site A".into(),
                upfront_cost: dec!(100000),
                upfront_credit: dec!(0),
                monthly_revenue: dec!(3000),
                monthly_cost: dec!(0),
                term: 60,
            }],
            target_irr: dec!(0.25),
            strategy: IrrStrategy::default(),
        }
    }

    #[test]
    fn test_stress_out_of_range_rejected() {
        let input = StressInput {
            project: project(),
            capex_stress: dec!(0.25),
            mrr_stress: dec!(0),
        };
        assert!(stress_project(&input).is_err());
    }

    #[test]
    fn test_stress_beyond_decimal_range_rejected() {
        let mut huge = project();
        huge.sites[0].upfront_cost = Decimal::MAX;
        let input = StressInput {
            project: huge,
            capex_stress: dec!(0.20),
            mrr_stress: dec!(0),
        };
        let err = stress_project(&input).unwrap_err();
        assert!(err.to_string().contains("capex_stress"));
    }

    #[test]
    fn test_heavier_capex_lowers_irr() {
        let input = StressInput {
            project: project(),
            capex_stress: dec!(0.20),
            mrr_stress: dec!(0),
        };
        let out = stress_project(&input).unwrap();
        assert!(out.result.irr_change.unwrap() < Decimal::ZERO);
        // ~29.5% baseline drops below the 25% hurdle
        assert_eq!(out.result.baseline.decision, Decision::Go);
        assert_eq!(out.result.stressed.decision, Decision::NoGo);
        assert!(out.result.decision_changed);
    }

    #[test]
    fn test_mrr_stress_moves_tcv() {
        let input = StressInput {
            project: project(),
            capex_stress: dec!(0),
            mrr_stress: dec!(-0.10),
        };
        let out = stress_project(&input).unwrap();
        assert_eq!(out.result.baseline.tcv_total, dec!(180000));
        assert_eq!(out.result.stressed.tcv_total, dec!(162000));
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CapexError;
use crate::irr::solve_irr;
use crate::time_value::annualize;
use crate::timeline::SiteInput;
use crate::types::*;
use crate::CapexResult;

use super::decision::decide;
use super::site::{evaluate_site, SiteResult};

/// A multi-site project evaluated against one annual hurdle rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    pub sites: Vec<SiteInput>,
    /// Annual hurdle rate (0.15 = 15%).
    pub target_irr: Rate,
    #[serde(default)]
    pub strategy: IrrStrategy,
}

/// Project-level appraisal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAggregate {
    pub target_irr_annual: Rate,
    /// Element-wise sum of every valid site's timeline, `max(term) + 1` long.
    pub combined_timeline: Timeline,
    /// Sum of the valid sites' TCVs.
    pub tcv_total: Money,
    pub irr_annual: IrrResult,
    pub decision: Decision,
    pub sites: Vec<SiteResult>,
}

/// Sum site timelines month by month, zero-padded to the longest term.
///
/// Each site puts its net upfront flow at month 0 and its net monthly flow
/// at months `1..=term`; shorter sites stop contributing after their term.
pub fn combine_timelines(sites: &[SiteInput]) -> CapexResult<Timeline> {
    if sites.is_empty() {
        return Err(CapexError::InsufficientData(
            "At least one site is required to build a project timeline".into(),
        ));
    }
    for site in sites {
        site.validate()?;
    }

    let max_term = sites.iter().map(|s| s.term).max().unwrap_or(0);
    let mut combined = Timeline::zeros(max_term as usize);
    for site in sites {
        combined.add_at(0, site.net_upfront());
        let net = site.net_monthly();
        for month in 1..=site.term {
            combined.add_at(month, net);
        }
    }
    Ok(combined)
}

/// Appraise every site, then the project as a whole.
///
/// Sites that fail validation are reported with decision `Error` and left
/// out of the combined timeline and TCV. Project IRR comes from the combined
/// timeline, so a site whose own IRR is unbounded or negative only matters
/// through its flows.
pub fn aggregate(input: &ProjectInput) -> CapexResult<ComputationOutput<ProjectAggregate>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.sites.is_empty() {
        return Err(CapexError::InsufficientData(
            "A project needs at least one site".into(),
        ));
    }

    let site_results: Vec<SiteResult> = input
        .sites
        .iter()
        .map(|site| evaluate_site(site, input.target_irr, input.strategy))
        .collect();

    let valid_sites: Vec<SiteInput> = input
        .sites
        .iter()
        .zip(&site_results)
        .filter_map(|(site, result)| {
            if result.is_valid {
                Some(site.clone())
            } else {
                let msg = format!(
                    "Site '{}' excluded from project totals: {}",
                    site.name,
                    result.error.as_deref().unwrap_or("invalid input")
                );
                log::warn!("{msg}");
                warnings.push(msg);
                None
            }
        })
        .collect();

    if valid_sites.is_empty() {
        return Err(CapexError::InsufficientData(
            "No site in the project has valid inputs".into(),
        ));
    }

    let combined_timeline = combine_timelines(&valid_sites)?;
    let irr_annual = annualize(solve_irr(combined_timeline.as_slice(), input.strategy));
    if irr_annual == IrrResult::NonConvergent {
        warnings.push("Project IRR solver did not converge; rate shown as 0%".into());
    }

    let tcv_total: Money = site_results
        .iter()
        .filter(|r| r.is_valid)
        .try_fold(Decimal::ZERO, |total, r| total.checked_add(r.tcv))
        .ok_or_else(|| CapexError::InvalidInput {
            field: "sites".into(),
            reason: "Combined contract value exceeds the representable range".into(),
        })?;

    let output = ProjectAggregate {
        target_irr_annual: input.target_irr,
        combined_timeline,
        tcv_total,
        irr_annual,
        decision: decide(&irr_annual, input.target_irr),
        sites: site_results,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Multi-site aggregation: zero-padded timeline sum, project IRR, TCV, GO / NO GO",
        &serde_json::json!({
            "target_irr": input.target_irr.to_string(),
            "strategy": input.strategy,
            "site_count": input.sites.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn site(name: &str, cost: Money, credit: Money, mrr: Money, term: i64) -> SiteInput {
        SiteInput {
            name: name.into(),
            upfront_cost: cost,
            upfront_credit: credit,
            monthly_revenue: mrr,
            monthly_cost: dec!(0),
            term,
        }
    }

    #[test]
    fn test_combine_zero_padding() {
        let a = site("A", dec!(1200), dec!(0), dec!(100), 12);
        let b = site("B", dec!(2400), dec!(0), dec!(150), 24);
        let tl = combine_timelines(&[a, b]).unwrap();
        assert_eq!(tl.len(), 25);
        assert_eq!(tl.upfront(), dec!(-3600));
        assert_eq!(tl.as_slice()[12], dec!(250));
        for month in 13..=24 {
            assert_eq!(tl.as_slice()[month], dec!(150));
        }
    }

    #[test]
    fn test_combine_requires_sites() {
        assert!(combine_timelines(&[]).is_err());
    }

    #[test]
    fn test_aggregate_empty_project_errors() {
        let input = ProjectInput {
            sites: vec![],
            target_irr: dec!(0.1),
            strategy: IrrStrategy::default(),
        };
        assert!(aggregate(&input).is_err());
    }

    #[test]
    fn test_aggregate_skips_invalid_site() {
        let input = ProjectInput {
            sites: vec![
                site("Good", dec!(100000), dec!(0), dec!(3000), 60),
                site("Blank", dec!(0), dec!(0), dec!(0), 0),
            ],
            target_irr: dec!(0.15),
            strategy: IrrStrategy::default(),
        };
        let out = aggregate(&input).unwrap();
        assert_eq!(out.result.combined_timeline.len(), 61);
        assert_eq!(out.result.tcv_total, dec!(180000));
        assert_eq!(out.result.sites[1].decision, Decision::Error);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_aggregate_unsolvable_project_irr_counts_as_zero() {
        // Combined [-100, 20 x12, -30 x12] has no IRR; Newton cycles for its
        // whole budget without settling.
        let earner = site("Earner", dec!(100), dec!(0), dec!(50), 12);
        let mut drain = site("Drain", dec!(0), dec!(0), dec!(0), 24);
        drain.monthly_cost = dec!(30);

        let mut input = ProjectInput {
            sites: vec![earner, drain],
            target_irr: dec!(0.15),
            strategy: IrrStrategy::NewtonRaphson,
        };
        let out = aggregate(&input).unwrap();
        assert_eq!(out.result.irr_annual, IrrResult::NonConvergent);
        assert_eq!(out.result.decision, Decision::NoGo);
        assert_eq!(out.result.sites[1].irr_annual, IrrResult::TotalLoss);
        assert!(out.warnings.iter().any(|w| w.contains("did not converge")));

        input.target_irr = dec!(-0.10);
        let out = aggregate(&input).unwrap();
        assert_eq!(out.result.decision, Decision::Go);
    }

    #[test]
    fn test_aggregate_all_invalid_errors() {
        let input = ProjectInput {
            sites: vec![site("Blank", dec!(0), dec!(0), dec!(0), 0)],
            target_irr: dec!(0.15),
            strategy: IrrStrategy::default(),
        };
        assert!(aggregate(&input).is_err());
    }
}

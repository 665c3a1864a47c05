//! Flexible-start business case.
//!
//! Locations start construction and billing in different months. Their
//! flows are accumulated into one master timeline, then valued three ways:
//! NPV at an annual discount rate, IRR by bisection (annualized), and
//! payback in whole months.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::irr::solve_irr;
use crate::payback::{payback, Payback};
use crate::time_value::{annualize, npv};
use crate::timeline::{annual_rollup, build_master_timeline, AnnualCashFlow, LocationInput};
use crate::types::*;
use crate::CapexResult;

use super::decision::decide;

/// Input for the business-case calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessCaseInput {
    pub locations: Vec<LocationInput>,
    /// Annual discount rate (0.10 = 10%), also the hurdle for the IRR.
    pub discount_rate: Rate,
}

/// Output of the business-case calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessCaseOutput {
    pub timeline: Timeline,
    pub horizon_months: usize,
    pub npv: Money,
    pub irr_annual: IrrResult,
    /// IRR against the discount rate.
    pub decision: Decision,
    pub payback: Payback,
    pub annual_cash_flows: Vec<AnnualCashFlow>,
}

/// Value a set of locations on their consolidated monthly timeline.
pub fn evaluate_business_case(
    input: &BusinessCaseInput,
) -> CapexResult<ComputationOutput<BusinessCaseOutput>> {
    let start = Instant::now();

    let master = build_master_timeline(&input.locations)?;
    let mut warnings = master.warnings;
    let flows = master.timeline.as_slice();

    let npv_value = npv(flows, input.discount_rate)?;
    let irr_annual = annualize(solve_irr(flows, IrrStrategy::Bisection));
    match irr_annual {
        IrrResult::Undefined => {
            warnings.push("IRR is not defined: cash flows never change sign".into())
        }
        IrrResult::NonConvergent => {
            warnings.push("IRR bisection did not converge within its iteration budget".into())
        }
        _ => {}
    }

    let output = BusinessCaseOutput {
        npv: npv_value,
        irr_annual,
        decision: decide(&irr_annual, input.discount_rate),
        payback: payback(flows),
        annual_cash_flows: annual_rollup(flows),
        horizon_months: master.horizon_months,
        timeline: master.timeline,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flexible-start business case: master timeline, NPV, bisection IRR, payback",
        &serde_json::json!({
            "discount_rate": input.discount_rate.to_string(),
            "location_count": input.locations.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn depot() -> LocationInput {
        LocationInput {
            name: "Depot".into(),
            construction_cost: dec!(80000),
            engineering_cost: dec!(20000),
            monthly_revenue: dec!(3500),
            monthly_recurring_cost: dec!(500),
            construction_start_month: dec!(1),
            billing_start_month: dec!(3),
            term: dec!(60),
        }
    }

    #[test]
    fn test_business_case_single_location() {
        let input = BusinessCaseInput {
            locations: vec![depot()],
            discount_rate: dec!(0.10),
        };
        let out = evaluate_business_case(&input).unwrap();
        let r = &out.result;
        // billing months 3..=62
        assert_eq!(r.horizon_months, 62);
        assert!(r.npv > Decimal::ZERO);
        assert!(r.irr_annual.rate().unwrap() > dec!(0.10));
        assert_eq!(r.decision, Decision::Go);
        // 34 billed months of 3000 => month 36
        assert_eq!(r.payback.months, 36);
        assert!(r.payback.recovered);
    }

    #[test]
    fn test_business_case_empty_project() {
        let input = BusinessCaseInput {
            locations: vec![],
            discount_rate: dec!(0.08),
        };
        let out = evaluate_business_case(&input).unwrap();
        assert_eq!(out.result.timeline.len(), 61);
        assert_eq!(out.result.npv, Decimal::ZERO);
        assert_eq!(out.result.irr_annual, IrrResult::Unbounded);
        assert!(out.result.payback.recovered);
    }

    #[test]
    fn test_business_case_never_pays_back() {
        let mut loc = depot();
        loc.monthly_revenue = dec!(600);
        let input = BusinessCaseInput {
            locations: vec![loc],
            discount_rate: dec!(0.10),
        };
        let out = evaluate_business_case(&input).unwrap();
        assert!(!out.result.payback.recovered);
        assert!(out.result.npv < Decimal::ZERO);
        assert_eq!(out.result.decision, Decision::NoGo);
    }
}

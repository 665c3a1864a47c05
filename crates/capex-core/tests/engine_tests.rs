use capex_core::irr::{self, bisection, newton};
use capex_core::payback::payback;
use capex_core::project::{aggregate, combine_timelines, evaluate_site, ProjectInput};
use capex_core::time_value::{annualize, npv};
use capex_core::timeline::SiteInput;
use capex_core::types::{Decision, IrrResult, IrrStrategy, Money};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

fn level_flows(upfront: Money, monthly: Money, term: usize) -> Vec<Money> {
    let mut flows = vec![upfront];
    flows.extend(std::iter::repeat(monthly).take(term));
    flows
}

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

// ===========================================================================
// NPV
// ===========================================================================

#[test]
fn test_npv_at_zero_rate_equals_sum() {
    let flows = vec![dec!(-1000), dec!(250.5), dec!(300), dec!(-20), dec!(600)];
    let sum: Decimal = flows.iter().sum();
    assert_eq!(npv(&flows, dec!(0)).unwrap(), sum);
}

#[test]
fn test_npv_upfront_only_timeline() {
    assert_eq!(npv(&[dec!(42)], dec!(0.08)).unwrap(), dec!(42));
}

#[test]
fn test_npv_discounts_only_recurring_months() {
    // 12% annual => 1.12^(1/12) monthly; month 12 discounted by exactly 1.12
    let mut flows = vec![dec!(-500)];
    flows.extend(std::iter::repeat(dec!(0)).take(11));
    flows.push(dec!(1120));
    let value = npv(&flows, dec!(0.12)).unwrap();
    assert!((value - dec!(500)).abs() < dec!(0.001), "got {value}");
}

// ===========================================================================
// IRR
// ===========================================================================

#[test]
fn test_trivial_cases_skip_solver() {
    let positive = [dec!(100), dec!(50), dec!(50)];
    let negative = [dec!(-100), dec!(-50), dec!(-50)];
    assert_eq!(
        annualize(irr::solve_irr(&positive, IrrStrategy::NewtonRaphson)),
        IrrResult::Unbounded
    );
    assert_eq!(
        annualize(irr::solve_irr(&negative, IrrStrategy::Bisection)),
        IrrResult::TotalLoss
    );
}

#[test]
fn test_newton_and_bisection_agree() {
    let flows = level_flows(dec!(-1000), dec!(100), 12);
    let by_newton = newton::solve(&flows).unwrap();
    let by_bisection = bisection::solve(&flows).rate().unwrap();
    let by_newton = Decimal::try_from(by_newton).unwrap();
    assert!(
        (by_newton - by_bisection).abs() < dec!(0.0001),
        "newton {by_newton} vs bisection {by_bisection}"
    );
}

#[test]
fn test_annualized_irr_rediscounts_to_zero_npv() {
    let flows = level_flows(dec!(-1000), dec!(100), 12);
    let monthly = irr::solve_irr(&flows, IrrStrategy::NewtonRaphson);
    let annual = annualize(monthly).rate().unwrap();
    let residual = npv(&flows, annual).unwrap();
    assert!(residual.abs() < dec!(0.05), "residual NPV {residual}");
}

#[test]
fn test_bisection_no_sign_change_is_undefined() {
    assert_eq!(bisection::solve(&[dec!(0), dec!(10)]), IrrResult::Undefined);
}

// ===========================================================================
// Payback
// ===========================================================================

#[test]
fn test_payback_never_recovers() {
    let result = payback(&[dec!(-1000), dec!(10), dec!(10), dec!(10)]);
    assert!(!result.recovered);
    assert_eq!(result.months, 0);
}

// ===========================================================================
// Aggregation
// ===========================================================================

#[test]
fn test_aggregator_zero_padding_twelve_and_twenty_four() {
    let short = site("Short", dec!(1000), dec!(0), dec!(100), 12);
    let long = site("Long", dec!(2000), dec!(0), dec!(70), 24);
    let combined = combine_timelines(&[short, long]).unwrap();
    let flows = combined.as_slice();
    assert_eq!(flows.len(), 25);
    assert_eq!(flows[12], dec!(170));
    assert!(flows[13..=24].iter().all(|cf| *cf == dec!(70)));
}

#[test]
fn test_single_site_reference_scenario() {
    let s = site("Reference", dec!(100000), dec!(0), dec!(3000), 60);
    let result = evaluate_site(&s, dec!(0.15), IrrStrategy::NewtonRaphson);
    let annual = result.irr_annual.rate().expect("finite IRR");
    assert!(annual > Decimal::ZERO);
    assert_eq!(result.tcv, dec!(180000));
    let expected = if annual >= dec!(0.15) {
        Decision::Go
    } else {
        Decision::NoGo
    };
    assert_eq!(result.decision, expected);
}

#[test]
fn test_classification_runs_on_combined_timeline() {
    // Site 1 alone is all-positive; site 2 alone needs a solver and misses
    // a 50% hurdle. Combined flows never go negative.
    let windfall = site("Windfall", dec!(0), dec!(5000), dec!(1000), 12);
    let build_out = site("Build-out", dec!(1000), dec!(0), dec!(50), 24);

    let alone = evaluate_site(&build_out, dec!(0.50), IrrStrategy::NewtonRaphson);
    assert_eq!(alone.decision, Decision::NoGo);

    let input = ProjectInput {
        sites: vec![windfall, build_out],
        target_irr: dec!(0.50),
        strategy: IrrStrategy::NewtonRaphson,
    };
    let out = aggregate(&input).unwrap();
    assert_eq!(out.result.irr_annual, IrrResult::Unbounded);
    assert_eq!(out.result.decision, Decision::Go);
    assert_eq!(out.result.sites[0].irr_annual, IrrResult::Unbounded);
    // (1000 * 12 + 5000) + (50 * 24)
    assert_eq!(out.result.tcv_total, dec!(18200));
}

#[test]
fn test_project_irr_from_mixed_sites() {
    let a = site("A", dec!(0), dec!(500), dec!(200), 12);
    let b = site("B", dec!(3000), dec!(0), dec!(100), 24);
    let input = ProjectInput {
        sites: vec![a, b],
        target_irr: dec!(0.15),
        strategy: IrrStrategy::NewtonRaphson,
    };
    let out = aggregate(&input).unwrap();
    let annual = out.result.irr_annual.rate().unwrap();
    // Combined [-2500, 300 x12, 100 x12] => ~8.37% monthly
    let expected = (dec!(1.0837)).powi(12) - Decimal::ONE;
    assert!((annual - expected).abs() < dec!(0.01), "got {annual}");
    assert_eq!(out.result.decision, Decision::Go);
}

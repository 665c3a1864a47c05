use crate::types::{IrrResult, Money};

use super::{npv_f64, rate_or_non_convergent, to_f64_flows};

const MAX_ITERATIONS: u32 = 1000;
const PRECISION: f64 = 1e-7;
const LOWER_BOUND: f64 = -0.99;
const UPPER_BOUND: f64 = 1.00;
const INITIAL_GUESS: f64 = 0.01;

/// Monthly IRR by bisection on `[-0.99, 1.00]`.
///
/// Needs at least one strictly positive and one strictly negative flow,
/// otherwise the rate is `Undefined`. Stops when |NPV| falls below `1e-7`
/// or the bracket is narrower than `1e-7`.
pub fn solve(cash_flows: &[Money]) -> IrrResult {
    let flows = to_f64_flows(cash_flows);
    let has_positive = flows.iter().any(|cf| *cf > 0.0);
    let has_negative = flows.iter().any(|cf| *cf < 0.0);
    if !has_positive || !has_negative {
        return IrrResult::Undefined;
    }

    let mut guess = INITIAL_GUESS;
    let mut low = LOWER_BOUND;
    let mut high = UPPER_BOUND;

    for _ in 0..MAX_ITERATIONS {
        let npv_at_guess = npv_f64(guess, &flows);
        if npv_at_guess.abs() < PRECISION {
            return rate_or_non_convergent(guess);
        }

        let npv_at_high = npv_f64(high, &flows);
        if npv_at_guess * npv_at_high > 0.0 {
            high = guess;
        } else {
            low = guess;
        }
        guess = (low + high) / 2.0;

        if (high - low).abs() < PRECISION {
            return rate_or_non_convergent(guess);
        }
    }

    log::debug!("Bisection IRR did not converge after {MAX_ITERATIONS} iterations");
    IrrResult::NonConvergent
}

const BRACKETED_MAX_ITERATIONS: u32 = 100;

/// Successively wider brackets tried until NPV changes sign across one.
const BRACKETS: [(f64, f64); 3] = [(-0.9999, 1.0), (-0.9999, 5.0), (-0.999999, 20.0)];

/// Monthly IRR by bisection, widening the bracket up to `[-0.999999, 20]`
/// before declaring the rate `Undefined`.
///
/// After 100 halvings the last midpoint is returned even if |NPV| is still
/// above `1e-7`.
pub fn solve_bracketed(cash_flows: &[Money]) -> IrrResult {
    let flows = to_f64_flows(cash_flows);

    let bracket = BRACKETS.iter().find_map(|&(low, high)| {
        let npv_low = npv_f64(low, &flows);
        let npv_high = npv_f64(high, &flows);
        (npv_low * npv_high <= 0.0).then_some((low, high, npv_low))
    });
    let Some((mut low, mut high, mut npv_at_low)) = bracket else {
        return IrrResult::Undefined;
    };

    let mut mid = (low + high) / 2.0;
    for _ in 0..BRACKETED_MAX_ITERATIONS {
        mid = (low + high) / 2.0;
        let npv_at_mid = npv_f64(mid, &flows);

        if npv_at_mid.abs() < PRECISION {
            return rate_or_non_convergent(mid);
        } else if npv_at_mid * npv_at_low > 0.0 {
            low = mid;
            npv_at_low = npv_at_mid;
        } else {
            high = mid;
        }
    }

    rate_or_non_convergent(mid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bisection_requires_sign_change() {
        assert_eq!(solve(&[dec!(100), dec!(50)]), IrrResult::Undefined);
        assert_eq!(solve(&[dec!(-100), dec!(0)]), IrrResult::Undefined);
    }

    #[test]
    fn test_bisection_three_period() {
        let cfs = vec![dec!(-1000), dec!(400), dec!(400), dec!(400)];
        let rate = solve(&cfs).rate().unwrap();
        assert!((rate - dec!(0.0970)).abs() < dec!(0.001));
    }

    #[test]
    fn test_bisection_root_above_bracket_collapses_to_lower_bound() {
        // Monthly IRR of 200% lies above the 100% upper bound. NPV stays
        // positive across the bracket, so the upper end keeps moving down
        // until the bracket narrows onto -0.99.
        let rate = solve(&[dec!(-100), dec!(300)]).rate().unwrap();
        assert!((rate - dec!(-0.99)).abs() < dec!(0.000001), "got {rate}");
    }

    #[test]
    fn test_bracketed_widens_for_high_returns() {
        // -100 then +300 => 200% monthly, only inside the [-0.9999, 5] bracket
        let rate = solve_bracketed(&[dec!(-100), dec!(300)]).rate().unwrap();
        assert!((rate - dec!(2)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_bracketed_gives_up_without_sign_change() {
        assert_eq!(
            solve_bracketed(&[dec!(-100), dec!(-100)]),
            IrrResult::Undefined
        );
    }
}

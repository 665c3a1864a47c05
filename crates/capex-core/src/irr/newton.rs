use crate::types::Money;

use super::{npv_f64, to_f64_flows};

const INITIAL_GUESS: f64 = 0.10;
const MAX_ITERATIONS: u32 = 1000;
const TOLERANCE: f64 = 1e-6;

/// Monthly IRR by Newton-Raphson.
///
/// Starts at 10% monthly and stops when successive guesses differ by less
/// than `1e-6`. `None` means the iteration budget ran out or an iterate
/// stopped being a finite number.
pub fn solve(cash_flows: &[Money]) -> Option<f64> {
    let flows = to_f64_flows(cash_flows);
    let mut guess = INITIAL_GUESS;

    for i in 0..MAX_ITERATIONS {
        let value = npv_f64(guess, &flows);
        let slope = derivative(guess, &flows);
        let next = guess - value / slope;

        if !next.is_finite() {
            log::debug!("Newton-Raphson IRR diverged at iteration {i} (guess {guess})");
            return None;
        }
        if (next - guess).abs() < TOLERANCE {
            return Some(next);
        }
        guess = next;
    }

    log::debug!("Newton-Raphson IRR did not converge after {MAX_ITERATIONS} iterations");
    None
}

/// `d/dg Σ CF[t]/(1+g)^t = Σ -t·CF[t]/(1+g)^(t+1)`
fn derivative(rate: f64, flows: &[f64]) -> f64 {
    let one_plus_r = 1.0 + rate;
    flows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, cf)| -(t as f64) * cf / one_plus_r.powi(t as i32 + 1))
        .sum()
}

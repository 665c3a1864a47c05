//! Internal Rate of Return for monthly timelines.
//!
//! Covers:
//! 1. **Trivial-case classifier** -- all flows non-negative (unbounded) or
//!    all non-positive (total loss), decided before any iteration.
//! 2. **Newton-Raphson** -- derivative-based, used by the uniform-start site
//!    and project calculators.
//! 3. **Bisection** -- fixed bracket, used for irregular multi-location flows.
//! 4. **Bracketed bisection** -- bisection that widens its bracket before
//!    giving up, used by the single-site quick calculator.
//!
//! Solvers iterate in `f64`: trial rates near -100% or runaway Newton steps
//! push discount factors far outside Decimal's range. Rates come back as
//! `Rate` (Decimal), and every outcome is an [`IrrResult`].

pub mod bisection;
pub mod classify;
pub mod newton;

use rust_decimal::prelude::*;

use crate::types::{IrrResult, IrrStrategy, Money, Rate};

pub use classify::classify;

/// Monthly IRR of a timeline: classifier first, then the chosen strategy.
pub fn solve_irr(cash_flows: &[Money], strategy: IrrStrategy) -> IrrResult {
    if let Some(trivial) = classify(cash_flows) {
        log::debug!("IRR short-circuited by sign pattern: {trivial:?}");
        return trivial;
    }

    match strategy {
        IrrStrategy::NewtonRaphson => match newton::solve(cash_flows) {
            Some(rate) => rate_or_non_convergent(rate),
            None => IrrResult::NonConvergent,
        },
        IrrStrategy::Bisection => bisection::solve(cash_flows),
        IrrStrategy::BracketedBisection => bisection::solve_bracketed(cash_flows),
    }
}

/// Timeline as `f64` for the root finders.
pub(crate) fn to_f64_flows(cash_flows: &[Money]) -> Vec<f64> {
    cash_flows
        .iter()
        .map(|cf| cf.to_f64().unwrap_or(0.0))
        .collect()
}

/// Wrap a solved `f64` rate, treating anything Decimal cannot hold as a
/// failed solve.
pub(crate) fn rate_or_non_convergent(rate: f64) -> IrrResult {
    if !rate.is_finite() {
        return IrrResult::NonConvergent;
    }
    match Rate::from_f64(rate) {
        Some(r) => IrrResult::Finite(r),
        None => IrrResult::NonConvergent,
    }
}

/// `Σ CF[t] / (1+rate)^t` with month 0 included, in `f64`.
pub(crate) fn npv_f64(rate: f64, flows: &[f64]) -> f64 {
    let one_plus_r = 1.0 + rate;
    flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / one_plus_r.powi(t as i32))
        .sum()
}

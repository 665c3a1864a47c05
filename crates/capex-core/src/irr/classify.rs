use rust_decimal::Decimal;

use crate::types::{IrrResult, Money};

/// Decide IRR from the sign pattern alone, when it is degenerate.
///
/// Returns `Unbounded` when no flow is negative and `TotalLoss` when no flow
/// is positive; `None` means the timeline changes sign and needs a solver.
/// An all-zero timeline satisfies both and is reported as `Unbounded`.
pub fn classify(cash_flows: &[Money]) -> Option<IrrResult> {
    if cash_flows.iter().all(|cf| *cf >= Decimal::ZERO) {
        return Some(IrrResult::Unbounded);
    }
    if cash_flows.iter().all(|cf| *cf <= Decimal::ZERO) {
        return Some(IrrResult::TotalLoss);
    }
    None
}

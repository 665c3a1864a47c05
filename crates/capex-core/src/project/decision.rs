use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Decision, IrrResult, Rate};

/// GO when the annualized IRR meets the annual hurdle rate.
///
/// `irr_annual` must already be annualized; monthly solver output compared
/// against an annual target would understate every project. A rate the
/// solver could not pin down is judged as 0%; an undefined rate is an error.
pub fn decide(irr_annual: &IrrResult, target_annual: Rate) -> Decision {
    let rate = match irr_annual {
        IrrResult::Unbounded => return Decision::Go,
        IrrResult::Undefined => return Decision::Error,
        IrrResult::TotalLoss => dec!(-1),
        IrrResult::NonConvergent => Decimal::ZERO,
        IrrResult::Finite(r) => *r,
    };

    if rate >= target_annual {
        Decision::Go
    } else {
        Decision::NoGo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(decide(&IrrResult::Finite(dec!(0.15)), dec!(0.15)), Decision::Go);
        assert_eq!(decide(&IrrResult::Finite(dec!(0.1499)), dec!(0.15)), Decision::NoGo);
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(decide(&IrrResult::Unbounded, dec!(100)), Decision::Go);
        assert_eq!(decide(&IrrResult::TotalLoss, dec!(0.05)), Decision::NoGo);
        assert_eq!(decide(&IrrResult::TotalLoss, dec!(-1)), Decision::Go);
        assert_eq!(decide(&IrrResult::Undefined, dec!(0.05)), Decision::Error);
    }

    #[test]
    fn test_non_convergent_judged_as_zero() {
        assert_eq!(decide(&IrrResult::NonConvergent, dec!(0.10)), Decision::NoGo);
        assert_eq!(decide(&IrrResult::NonConvergent, dec!(0)), Decision::Go);
    }
}

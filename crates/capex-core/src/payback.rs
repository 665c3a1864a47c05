use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Money;

/// Payback period in whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payback {
    /// First month in which cumulative inflow covers the investment
    /// (0 when there is nothing to recover or it is never recovered).
    pub months: u32,
    pub recovered: bool,
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.recovered {
            write!(f, "{} Months", self.months)
        } else {
            f.write_str("Never")
        }
    }
}

/// Months until cumulative inflows recover the initial investment.
///
/// The investment is every strictly negative flow in the timeline, not just
/// month 0, so capital spread across months is fully counted. Inflows are
/// the strictly positive flows from month 1 onward. No intra-month
/// interpolation.
pub fn payback(cash_flows: &[Money]) -> Payback {
    let initial_investment: Money = cash_flows
        .iter()
        .filter(|cf| **cf < Decimal::ZERO)
        .fold(Decimal::ZERO, |total, cf| total.saturating_add(cf.abs()));

    if initial_investment.is_zero() {
        return Payback {
            months: 0,
            recovered: true,
        };
    }

    let mut cumulative = Decimal::ZERO;
    for (month, cf) in cash_flows.iter().enumerate().skip(1) {
        if *cf > Decimal::ZERO {
            cumulative = cumulative.saturating_add(*cf);
        }
        if cumulative >= initial_investment {
            return Payback {
                months: month as u32,
                recovered: true,
            };
        }
    }

    Payback {
        months: 0,
        recovered: false,
    }
}

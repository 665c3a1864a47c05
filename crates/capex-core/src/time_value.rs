use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CapexError;
use crate::types::{IrrResult, Money, Rate};
use crate::CapexResult;

const MONTHS_PER_YEAR: i64 = 12;

/// Annualized rates above this (50000%) are reported as unbounded.
const MAX_DISPLAY_ANNUAL_RATE: Decimal = dec!(500);

/// Effective monthly rate equivalent to an annual rate:
/// `(1 + annual)^(1/12) - 1`.
pub fn monthly_rate(annual: Rate) -> CapexResult<Rate> {
    if annual < dec!(-1) {
        return Err(CapexError::InvalidInput {
            field: "discount_rate".into(),
            reason: "Annual rate must not be below -100%".into(),
        });
    }
    if annual == dec!(-1) {
        return Ok(dec!(-1));
    }
    if annual.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let exponent = Decimal::ONE / Decimal::from(MONTHS_PER_YEAR);
    let growth = (Decimal::ONE + annual)
        .checked_powd(exponent)
        .ok_or_else(|| CapexError::InvalidInput {
            field: "discount_rate".into(),
            reason: format!("Cannot derive a monthly rate from {annual}"),
        })?;
    Ok(growth - Decimal::ONE)
}

/// Present value of a timeline at a periodic (monthly) rate.
///
/// Month 0 is taken at face value. Once the discount factor outgrows
/// Decimal's range the remaining terms are below its resolution and the
/// sum stops there. A negative rate shrinks the factor instead; when a
/// discounted term or the running sum leaves Decimal's range the NPV is
/// reported as `DivisionByZero`.
pub fn periodic_npv(rate: Rate, cash_flows: &[Money]) -> CapexResult<Money> {
    if rate <= dec!(-1) {
        return Err(CapexError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;
    let mut result = cash_flows.first().copied().unwrap_or(Decimal::ZERO);

    for (t, cf) in cash_flows.iter().enumerate().skip(1) {
        discount = match discount.checked_mul(one_plus_r) {
            Some(d) => d,
            None => break,
        };
        result = cf
            .checked_div(discount)
            .and_then(|pv| result.checked_add(pv))
            .ok_or_else(|| CapexError::DivisionByZero {
                context: format!(
                    "NPV discount factor {discount} at month {t} (present value out of range)"
                ),
            })?;
    }

    Ok(result)
}

/// Net Present Value of a monthly timeline at an annual discount rate.
///
/// An annual rate of exactly -100% implies a monthly rate of -1; the
/// upfront flow is returned unmodified in that case.
pub fn npv(cash_flows: &[Money], annual_discount_rate: Rate) -> CapexResult<Money> {
    let rate = monthly_rate(annual_discount_rate)?;
    if rate == dec!(-1) {
        return Ok(cash_flows.first().copied().unwrap_or(Decimal::ZERO));
    }
    periodic_npv(rate, cash_flows)
}

/// Convert a monthly IRR outcome into an annual one: `(1 + m)^12 - 1`.
///
/// Runaway rates above 50000% collapse to `Unbounded`, anything at or
/// below -100% to `TotalLoss`. Non-finite outcomes pass through.
pub fn annualize(monthly: IrrResult) -> IrrResult {
    let m = match monthly {
        IrrResult::Finite(m) => m,
        other => return other,
    };

    let annual = match (Decimal::ONE + m).checked_powi(MONTHS_PER_YEAR) {
        Some(growth) => growth - Decimal::ONE,
        None => return IrrResult::Unbounded,
    };

    if annual > MAX_DISPLAY_ANNUAL_RATE {
        IrrResult::Unbounded
    } else if annual <= dec!(-1) {
        IrrResult::TotalLoss
    } else {
        IrrResult::Finite(annual)
    }
}

//! Cash-flow timeline construction.
//!
//! Two timing models feed the engine:
//! 1. **Uniform start** -- one site, upfront net flow at month 0 and a level
//!    net flow for months `1..=term`.
//! 2. **Flexible start** -- many locations, each with its own construction
//!    month, billing start and term, accumulated into one master timeline.
//!
//! Plus an annual roll-up of any timeline.

pub mod flexible;
pub mod rollup;
pub mod uniform;

use rust_decimal::prelude::*;

use crate::error::CapexError;
use crate::CapexResult;

pub use flexible::{build_master_timeline, LocationInput, MasterTimeline};
pub use rollup::{annual_rollup, AnnualCashFlow};
pub use uniform::{uniform_timeline, SiteInput};

/// Longest timeline the builders will allocate (100 years of months).
pub const MAX_TIMELINE_MONTHS: i64 = 1200;

/// Round a month offset half away from zero.
pub(crate) fn round_month(field: &str, value: Decimal) -> CapexResult<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| CapexError::InvalidInput {
            field: field.into(),
            reason: format!("{value} is not a usable month offset"),
        })
}

/// Terms must be at least one month and fit the timeline limit.
pub(crate) fn validate_term(field: &str, term: i64) -> CapexResult<()> {
    if term <= 0 {
        return Err(CapexError::InvalidInput {
            field: field.into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    if term > MAX_TIMELINE_MONTHS {
        return Err(CapexError::InvalidInput {
            field: field.into(),
            reason: format!("Term must not exceed {MAX_TIMELINE_MONTHS} months"),
        });
    }
    Ok(())
}

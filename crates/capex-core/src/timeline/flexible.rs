use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CapexError;
use crate::types::{Money, Timeline};
use crate::CapexResult;

use super::{round_month, validate_term, MAX_TIMELINE_MONTHS};

/// Shortest project horizon, so a nearly empty project still charts five years.
pub const MIN_HORIZON_MONTHS: i64 = 60;

/// One location in the flexible-start model.
///
/// Month offsets may be fractional; they are rounded half away from zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationInput {
    pub name: String,
    pub construction_cost: Money,
    pub engineering_cost: Money,
    pub monthly_revenue: Money,
    pub monthly_recurring_cost: Money,
    /// Month in which the capital cost is charged.
    pub construction_start_month: Decimal,
    /// First month of recurring billing.
    pub billing_start_month: Decimal,
    /// Number of billed months.
    pub term: Decimal,
}

impl LocationInput {
    pub fn capital_cost(&self) -> Money {
        self.construction_cost + self.engineering_cost
    }

    pub fn net_monthly(&self) -> Money {
        self.monthly_revenue - self.monthly_recurring_cost
    }
}

/// Consolidated timeline for a set of locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterTimeline {
    pub timeline: Timeline,
    /// Last month index `H`; the timeline holds `H + 1` entries.
    pub horizon_months: usize,
    /// Contributions that fell outside `[0, H]` and were dropped.
    pub warnings: Vec<String>,
}

/// Rounded offsets of one location, checked once.
struct Schedule {
    capex_month: i64,
    billing_start: i64,
    term: i64,
}

impl Schedule {
    fn from_location(index: usize, loc: &LocationInput) -> CapexResult<Self> {
        let field = |name: &str| format!("locations[{index}].{name}");
        let capex_month = round_month(&field("construction_start_month"), loc.construction_start_month)?;
        let billing_start = round_month(&field("billing_start_month"), loc.billing_start_month)?;
        let term = round_month(&field("term"), loc.term)?;
        validate_term(&field("term"), term)?;

        let schedule = Schedule {
            capex_month,
            billing_start,
            term,
        };
        if schedule.last_event_month() > MAX_TIMELINE_MONTHS {
            return Err(CapexError::InvalidInput {
                field: field("billing_start_month"),
                reason: format!("Schedule runs past month {MAX_TIMELINE_MONTHS}"),
            });
        }
        Ok(schedule)
    }

    fn last_event_month(&self) -> i64 {
        self.capex_month
            .max(self.billing_start.saturating_add(self.term) - 1)
    }
}

/// Accumulate every location into one monthly timeline.
///
/// The horizon `H` is the latest construction or billing month across all
/// locations, but never less than 60. Capital cost is charged at the rounded
/// construction month, month 0 included; net monthly flow is added over
/// `[billing_start, billing_start + term)`. Anything before month 0 is
/// dropped and reported in `warnings`.
pub fn build_master_timeline(locations: &[LocationInput]) -> CapexResult<MasterTimeline> {
    let schedules = locations
        .iter()
        .enumerate()
        .map(|(i, loc)| Schedule::from_location(i, loc))
        .collect::<CapexResult<Vec<_>>>()?;

    let horizon = schedules
        .iter()
        .map(Schedule::last_event_month)
        .fold(MIN_HORIZON_MONTHS, i64::max);

    let mut timeline = Timeline::zeros(horizon as usize);
    let mut warnings = Vec::new();

    for (loc, schedule) in locations.iter().zip(&schedules) {
        if !timeline.add_at(schedule.capex_month, -loc.capital_cost()) {
            let msg = format!(
                "{}: capital cost at month {} lies outside the project horizon and was not applied",
                display_name(loc),
                schedule.capex_month
            );
            log::warn!("{msg}");
            warnings.push(msg);
        }

        let net = loc.net_monthly();
        let dropped = (schedule.billing_start..schedule.billing_start + schedule.term)
            .filter(|month| !timeline.add_at(*month, net))
            .count();
        if dropped > 0 {
            let msg = format!(
                "{}: {dropped} billing month(s) before month 0 were dropped",
                display_name(loc)
            );
            log::warn!("{msg}");
            warnings.push(msg);
        }
    }

    Ok(MasterTimeline {
        timeline,
        horizon_months: horizon as usize,
        warnings,
    })
}

fn display_name(loc: &LocationInput) -> &str {
    if loc.name.is_empty() {
        "unnamed location"
    } else {
        &loc.name
    }
}

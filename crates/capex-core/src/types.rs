use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CapexError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// A monthly cash-flow timeline.
///
/// Index 0 is the upfront period (month zero, never discounted); indices
/// `1..=N` are the recurring months. Always holds at least one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Money>", into = "Vec<Money>")]
pub struct Timeline(Vec<Money>);

impl Timeline {
    pub fn new(flows: Vec<Money>) -> Result<Self, CapexError> {
        if flows.is_empty() {
            return Err(CapexError::InsufficientData(
                "a cash-flow timeline needs at least the month-0 entry".into(),
            ));
        }
        Ok(Timeline(flows))
    }

    /// Zero-filled timeline covering month 0 through `last_month`.
    pub fn zeros(last_month: usize) -> Self {
        Timeline(vec![Decimal::ZERO; last_month + 1])
    }

    /// Month-0 net flow.
    pub fn upfront(&self) -> Money {
        self.0[0]
    }

    /// Months `1..=N`.
    pub fn recurring(&self) -> &[Money] {
        &self.0[1..]
    }

    pub fn as_slice(&self) -> &[Money] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the last month in the timeline.
    pub fn last_month(&self) -> usize {
        self.0.len() - 1
    }

    /// Accumulate `amount` into `month`. Returns false when the month lies
    /// outside the timeline and nothing was written.
    pub fn add_at(&mut self, month: i64, amount: Money) -> bool {
        match usize::try_from(month) {
            Ok(idx) if idx < self.0.len() => {
                self.0[idx] += amount;
                true
            }
            _ => false,
        }
    }

    pub fn into_inner(self) -> Vec<Money> {
        self.0
    }
}

impl TryFrom<Vec<Money>> for Timeline {
    type Error = CapexError;

    fn try_from(flows: Vec<Money>) -> Result<Self, Self::Error> {
        Timeline::new(flows)
    }
}

impl From<Timeline> for Vec<Money> {
    fn from(timeline: Timeline) -> Self {
        timeline.0
    }
}

impl AsRef<[Money]> for Timeline {
    fn as_ref(&self) -> &[Money] {
        &self.0
    }
}

/// Outcome of an IRR computation.
///
/// The same type carries monthly solver output and annualized rates; which
/// one a value holds is fixed by where it came from (`irr::solve_irr` is
/// monthly, `time_value::annualize` is annual).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "rate", rename_all = "snake_case")]
pub enum IrrResult {
    /// A solved rate.
    Finite(Rate),
    /// Every flow is non-negative: the return is unbounded.
    Unbounded,
    /// Every flow is non-positive: -100%.
    TotalLoss,
    /// No sign change, so no rate zeroes NPV.
    Undefined,
    /// The solver exhausted its iteration budget.
    NonConvergent,
}

impl IrrResult {
    pub fn rate(&self) -> Option<Rate> {
        match self {
            IrrResult::Finite(r) => Some(*r),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, IrrResult::Finite(_))
    }
}

impl fmt::Display for IrrResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrrResult::Finite(r) => write!(f, "{:.2}%", r * Decimal::ONE_HUNDRED),
            IrrResult::Unbounded => write!(f, "Infinite"),
            IrrResult::TotalLoss => write!(f, "-100.00%"),
            IrrResult::Undefined => write!(f, "N/A"),
            IrrResult::NonConvergent => write!(f, "0.00%"),
        }
    }
}

/// Investment verdict against a hurdle rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "NO GO")]
    NoGo,
    #[serde(rename = "Error")]
    Error,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Decision::Go => "GO",
            Decision::NoGo => "NO GO",
            Decision::Error => "Error",
        };
        f.write_str(label)
    }
}

/// Root-finding method used once the trivial-case classifier is inconclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrStrategy {
    /// Derivative-based, starting at 10% monthly.
    #[default]
    NewtonRaphson,
    /// Fixed bracket `[-0.99, 1.00]`, for irregular multi-location flows.
    Bisection,
    /// Bisection that widens its bracket up to 2000% before giving up.
    BracketedBisection,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit cash flows, f64 root finding".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_timeline_rejects_empty() {
        assert!(Timeline::new(vec![]).is_err());
        assert!(serde_json::from_str::<Timeline>("[]").is_err());
    }

    #[test]
    fn test_timeline_add_at_ignores_out_of_range() {
        let mut tl = Timeline::zeros(2);
        assert!(tl.add_at(2, dec!(5)));
        assert!(!tl.add_at(3, dec!(5)));
        assert!(!tl.add_at(-1, dec!(5)));
        assert_eq!(tl.as_slice(), &[dec!(0), dec!(0), dec!(5)]);
    }

    #[test]
    fn test_irr_display_sentinels() {
        assert_eq!(IrrResult::Finite(dec!(0.1234)).to_string(), "12.34%");
        assert_eq!(IrrResult::Unbounded.to_string(), "Infinite");
        assert_eq!(IrrResult::TotalLoss.to_string(), "-100.00%");
        assert_eq!(IrrResult::Undefined.to_string(), "N/A");
        assert_eq!(IrrResult::NonConvergent.to_string(), "0.00%");
    }

    #[test]
    fn test_irr_result_serde_shape() {
        let json = serde_json::to_value(IrrResult::Finite(dec!(0.25))).unwrap();
        assert_eq!(json["status"], "finite");
        let json = serde_json::to_value(IrrResult::Unbounded).unwrap();
        assert_eq!(json["status"], "unbounded");
    }

    #[test]
    fn test_decision_labels() {
        assert_eq!(serde_json::to_string(&Decision::NoGo).unwrap(), "\"NO GO\"");
        assert_eq!(Decision::Go.to_string(), "GO");
    }
}

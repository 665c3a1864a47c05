use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CapexError;
use crate::types::{Money, Timeline};
use crate::CapexResult;

use super::validate_term;

/// One site in the uniform-start model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInput {
    /// Site label (address, store number, ...).
    #[serde(default)]
    pub name: String,
    /// Sum of one-time capital costs, charged at month 0.
    pub upfront_cost: Money,
    /// One-time revenue (NRR) realized at month 0.
    #[serde(default)]
    pub upfront_credit: Money,
    /// Monthly recurring revenue (MRR).
    pub monthly_revenue: Money,
    /// Monthly recurring cost.
    #[serde(default)]
    pub monthly_cost: Money,
    /// Number of recurring months.
    pub term: i64,
}

impl SiteInput {
    pub fn validate(&self) -> CapexResult<()> {
        if self.upfront_cost < Decimal::ZERO {
            return Err(CapexError::InvalidInput {
                field: "upfront_cost".into(),
                reason: "Upfront cost must be non-negative".into(),
            });
        }
        if self.upfront_credit < Decimal::ZERO {
            return Err(CapexError::InvalidInput {
                field: "upfront_credit".into(),
                reason: "Upfront credit must be non-negative".into(),
            });
        }
        validate_term("term", self.term)?;
        self.tcv().map(|_| ())
    }

    /// Month-0 flow: credit less capital cost.
    pub fn net_upfront(&self) -> Money {
        self.upfront_credit - self.upfront_cost
    }

    /// Flow for each recurring month.
    pub fn net_monthly(&self) -> Money {
        self.monthly_revenue - self.monthly_cost
    }

    /// Total Contract Value: undiscounted recurring revenue plus the upfront
    /// credit. Independent of costs and of the IRR timeline.
    pub fn tcv(&self) -> CapexResult<Money> {
        self.monthly_revenue
            .checked_mul(Decimal::from(self.term))
            .and_then(|recurring| recurring.checked_add(self.upfront_credit))
            .ok_or_else(|| CapexError::InvalidInput {
                field: "monthly_revenue".into(),
                reason: "Contract value over the term exceeds the representable range".into(),
            })
    }
}

/// Timeline of length `term + 1`: net upfront at month 0, net monthly flow
/// for months `1..=term`.
pub fn uniform_timeline(site: &SiteInput) -> CapexResult<Timeline> {
    site.validate()?;

    let mut flows = Vec::with_capacity(site.term as usize + 1);
    flows.push(site.net_upfront());
    flows.extend(std::iter::repeat(site.net_monthly()).take(site.term as usize));
    Timeline::new(flows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn site(term: i64) -> SiteInput {
        SiteInput {
            name: "Main St".into(),
            upfront_cost: dec!(100000),
            upfront_credit: dec!(5000),
            monthly_revenue: dec!(3500),
            monthly_cost: dec!(500),
            term,
        }
    }

    #[test]
    fn test_uniform_layout() {
        let tl = uniform_timeline(&site(3)).unwrap();
        assert_eq!(
            tl.as_slice(),
            &[dec!(-95000), dec!(3000), dec!(3000), dec!(3000)]
        );
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = uniform_timeline(&site(0)).unwrap_err();
        assert!(err.to_string().contains("term"));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut s = site(12);
        s.upfront_cost = dec!(-1);
        assert!(uniform_timeline(&s).is_err());
    }

    #[test]
    fn test_tcv_ignores_costs() {
        // 3500 * 60 + 5000
        assert_eq!(site(60).tcv().unwrap(), dec!(215000));
    }

    #[test]
    fn test_unrepresentable_tcv_rejected() {
        let mut s = site(1200);
        s.monthly_revenue = dec!(100000000000000000000000000);
        let err = uniform_timeline(&s).unwrap_err();
        assert!(err.to_string().contains("monthly_revenue"));
    }
}

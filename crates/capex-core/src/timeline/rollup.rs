use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

const MONTHS_PER_YEAR: usize = 12;

/// Net flow for one project year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualCashFlow {
    /// Year 0 is the upfront month; year k covers months `12(k-1)+1 ..= 12k`.
    pub year: usize,
    pub net: Money,
    pub cumulative: Money,
}

/// Roll a monthly timeline up into project years. The last year may be partial.
pub fn annual_rollup(cash_flows: &[Money]) -> Vec<AnnualCashFlow> {
    let Some((&upfront, recurring)) = cash_flows.split_first() else {
        return Vec::new();
    };

    let mut rows = vec![AnnualCashFlow {
        year: 0,
        net: upfront,
        cumulative: upfront,
    }];
    let mut cumulative = upfront;

    for (i, chunk) in recurring.chunks(MONTHS_PER_YEAR).enumerate() {
        let net: Decimal = chunk.iter().sum();
        cumulative += net;
        rows.push(AnnualCashFlow {
            year: i + 1,
            net,
            cumulative,
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rollup_partial_final_year() {
        let mut flows = vec![dec!(-1000)];
        flows.extend(std::iter::repeat(dec!(10)).take(14));
        let rows = annual_rollup(&flows);
        assert_eq!(
            rows,
            vec![
                AnnualCashFlow { year: 0, net: dec!(-1000), cumulative: dec!(-1000) },
                AnnualCashFlow { year: 1, net: dec!(120), cumulative: dec!(-880) },
                AnnualCashFlow { year: 2, net: dec!(20), cumulative: dec!(-860) },
            ]
        );
    }

    #[test]
    fn test_rollup_upfront_only() {
        assert_eq!(annual_rollup(&[dec!(5)]).len(), 1);
        assert!(annual_rollup(&[]).is_empty());
    }
}

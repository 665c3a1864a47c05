//! Lenient parsing of user-entered form text.
//!
//! Form fields arrive as raw strings on every keystroke. Numbers are read
//! from the longest numeric prefix (`"1200 USD"` is 1200), and anything
//! unreadable, including an empty field, counts as zero. Validation happens
//! later, in the timeline builders.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::timeline::{LocationInput, SiteInput};
use crate::types::{Money, Rate};

/// Longest prefix of `s` that reads as a decimal number, with optional
/// sign, fraction and exponent.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        mantissa_end = digits_from(int_end + 1);
    }
    let has_digits = mantissa_end > end && !(mantissa_end == end + 1 && bytes[end] == b'.');
    if !has_digits {
        return "";
    }
    let mut result_end = mantissa_end;

    if matches!(bytes.get(mantissa_end), Some(b'e') | Some(b'E')) {
        let mut exp_start = mantissa_end + 1;
        if matches!(bytes.get(exp_start), Some(b'+') | Some(b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            result_end = exp_end;
        }
    }

    &s[..result_end]
}

/// Parse a money amount; unreadable text is zero.
pub fn parse_amount(text: &str) -> Money {
    let prefix = numeric_prefix(text.trim());
    if prefix.is_empty() {
        return Decimal::ZERO;
    }
    let prefix = prefix.trim_end_matches('.');
    Decimal::from_str(prefix)
        .or_else(|_| Decimal::from_scientific(prefix))
        .ok()
        .or_else(|| prefix.parse::<f64>().ok().and_then(Decimal::from_f64))
        .unwrap_or(Decimal::ZERO)
}

/// Parse a percentage (`"15"` → 0.15); unreadable text is zero.
pub fn parse_percent(text: &str) -> Rate {
    parse_amount(text) / Decimal::ONE_HUNDRED
}

/// Parse a whole number of months from the leading integer; unreadable
/// text is zero.
pub fn parse_term(text: &str) -> i64 {
    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    trimmed[..end].parse().unwrap_or(0)
}

/// Raw text of one site card in the uniform-start calculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSiteForm {
    pub name: String,
    pub upfront_cost: String,
    pub upfront_credit: String,
    pub monthly_revenue: String,
    pub monthly_cost: String,
    pub term: String,
}

impl RawSiteForm {
    pub fn to_site(&self) -> SiteInput {
        SiteInput {
            name: self.name.trim().to_string(),
            upfront_cost: parse_amount(&self.upfront_cost),
            upfront_credit: parse_amount(&self.upfront_credit),
            monthly_revenue: parse_amount(&self.monthly_revenue),
            monthly_cost: parse_amount(&self.monthly_cost),
            term: parse_term(&self.term),
        }
    }
}

/// Raw text of one location card in the flexible-start calculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLocationForm {
    pub name: String,
    pub construction_cost: String,
    pub engineering_cost: String,
    pub monthly_revenue: String,
    pub monthly_recurring_cost: String,
    pub construction_start_month: String,
    pub billing_start_month: String,
    pub term: String,
}

impl RawLocationForm {
    pub fn to_location(&self) -> LocationInput {
        LocationInput {
            name: self.name.trim().to_string(),
            construction_cost: parse_amount(&self.construction_cost),
            engineering_cost: parse_amount(&self.engineering_cost),
            monthly_revenue: parse_amount(&self.monthly_revenue),
            monthly_recurring_cost: parse_amount(&self.monthly_recurring_cost),
            construction_start_month: parse_amount(&self.construction_start_month),
            billing_start_month: parse_amount(&self.billing_start_month),
            term: parse_amount(&self.term),
        }
    }
}

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Amount of money in a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
}

impl MonetaryAmount {
    pub fn usd(amount: Decimal) -> Self {
        Self {
            amount,
            currency: String::from(DEFAULT_CURRENCY),
        }
    }
}

/// Provenance of the numbers behind a valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub label: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolved_data_points: Vec<String>,
}

impl Citation {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
            dataset_version: None,
            resolved_data_points: Vec::new(),
        }
    }

    pub fn with_dataset_version(mut self, version: Option<String>) -> Self {
        self.dataset_version = version.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn with_resolved_data_points(mut self, points: Vec<String>) -> Self {
        self.resolved_data_points = points;
        self
    }
}

/// Round to `dp` decimal places, ties away from zero.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Render `value` rounded half-up to exactly `dp` decimals, e.g. `20.8311`.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    format!("{:.prec$}", round_half_up(value, dp), prec = dp as usize)
}

/// Render an amount with two decimals and thousands separators, e.g. `1,234.50`.
pub fn format_amount(value: Decimal) -> String {
    let text = format_fixed(value, 2);
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{fraction}")
}

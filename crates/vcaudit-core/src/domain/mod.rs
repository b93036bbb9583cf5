//! # Domain Models
//!
//! Value types shared by providers, methodologies, and the engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MonetaryAmount`] | Decimal amount with currency code |
//! | [`Citation`] | Dataset provenance attached to a result |
//! | [`MarketIndexPoint`] | Index level resolved for a date |
//! | [`ComparableCompany`] | Public peer with EV/Revenue multiple |
//! | [`Statistic`] | Median or mean aggregation |
//! | [`UtcDateTime`] | Second-precision UTC timestamp |
//!
//! All values are immutable once built; monetary values and multiples are
//! `rust_decimal::Decimal` and only become JSON numbers at serialization.

pub mod iso_date;
mod market;
mod models;
mod timestamp;

pub use market::{aggregate_multiple, ComparableCompany, MarketIndexPoint, Statistic};
pub use models::{
    format_amount, format_fixed, round_half_up, Citation, MonetaryAmount, DEFAULT_CURRENCY,
};
pub use timestamp::UtcDateTime;

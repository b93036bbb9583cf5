//! # vcaudit Core
//!
//! Auditable point-in-time valuations for private companies.
//!
//! ## Overview
//!
//! A [`ValuationEngine`] routes a [`ValuationRequest`] to a registered
//! [`Methodology`], which pulls reference data through the provider traits
//! in [`data_source`] and returns a [`ValuationResult`] documenting every
//! input, arithmetic step, citation and confidence signal behind the number.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | In-memory index and comparable-company datasets |
//! | [`config`] | Engine configuration |
//! | [`data_source`] | Provider traits and dataset descriptors |
//! | [`domain`] | Value types (amounts, citations, index points, comps) |
//! | [`engine`] | Methodology registry and dispatch |
//! | [`error`] | Validation, data source, and umbrella errors |
//! | [`methodology`] | Last-round and comparable-companies algorithms |
//! | [`request`] | Request parsing |
//! | [`result`] | Result model and audit metadata |
//! | [`validation`] | Field extraction and decimal/date parsing |
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use vcaudit_core::ValuationEngine;
//!
//! let engine = ValuationEngine::default();
//! let result = engine
//!     .evaluate_value(&json!({
//!         "company_name": "Basis AI",
//!         "methodology": "last_round_market_adjusted",
//!         "as_of_date": "2026-02-18",
//!         "inputs": {
//!             "last_post_money_valuation": 100000000,
//!             "last_round_date": "2024-06-30"
//!         }
//!     }))
//!     .expect("valuation");
//!
//! assert_eq!(result.valuation_result.derivation_steps.len(), 4);
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`CoreError`]. Callers use
//! [`CoreError::is_client_error`] to separate bad input and missing reference
//! data from internal faults.

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod engine;
pub mod error;
pub mod methodology;
pub mod request;
pub mod result;
pub mod validation;

pub use adapters::{MockComparableCompanySource, MockMarketIndexSource};
pub use config::EngineConfig;
pub use data_source::{ComparableCompanySource, DatasetDescriptor, MarketIndexSource};
pub use domain::{
    Citation, ComparableCompany, MarketIndexPoint, MonetaryAmount, Statistic, UtcDateTime,
};
pub use engine::{MethodologyInfo, ValuationEngine};
pub use error::{CoreError, DataSourceError, ValidationError};
pub use methodology::{
    ComparableCompanies, LastRoundMarketAdjusted, Methodology, MethodologyContext,
};
pub use request::ValuationRequest;
pub use result::{AuditMetadata, Valuation, ValuationResult, ENGINE_VERSION};

//! Valuation methodologies.
//!
//! Each methodology validates its own inputs, pulls reference data from the
//! [`MethodologyContext`] and records every arithmetic step it performs. The
//! engine registers them by [`Methodology::name`].

mod comparables;
mod confidence;
mod last_round;

use std::sync::Arc;

use rust_decimal::Decimal;

pub use comparables::ComparableCompanies;
pub use confidence::{PeerSetQuality, StalenessRisk};
pub use last_round::LastRoundMarketAdjusted;

use crate::data_source::{ComparableCompanySource, MarketIndexSource};
use crate::{CoreError, ValuationRequest, ValuationResult};

/// Read-only providers shared by every methodology invocation.
#[derive(Clone)]
pub struct MethodologyContext {
    index_source: Arc<dyn MarketIndexSource>,
    comps_source: Arc<dyn ComparableCompanySource>,
}

impl MethodologyContext {
    pub fn new(
        index_source: Arc<dyn MarketIndexSource>,
        comps_source: Arc<dyn ComparableCompanySource>,
    ) -> Self {
        Self {
            index_source,
            comps_source,
        }
    }

    pub fn index_source(&self) -> &dyn MarketIndexSource {
        self.index_source.as_ref()
    }

    pub fn comps_source(&self) -> &dyn ComparableCompanySource {
        self.comps_source.as_ref()
    }
}

impl std::fmt::Debug for MethodologyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodologyContext")
            .field("index_source", &self.index_source.dataset().label)
            .field("comps_source", &self.comps_source.dataset().label)
            .finish()
    }
}

/// A named valuation algorithm.
pub trait Methodology: Send + Sync {
    /// Registry key, matched exactly against the request's methodology.
    fn name(&self) -> &'static str;

    /// One-line description for catalog listings.
    fn description(&self) -> &'static str;

    fn valuate(
        &self,
        request: &ValuationRequest,
        context: &MethodologyContext,
    ) -> Result<ValuationResult, CoreError>;
}

fn checked_mul(lhs: Decimal, rhs: Decimal, operation: &'static str) -> Result<Decimal, CoreError> {
    lhs.checked_mul(rhs).ok_or(CoreError::Overflow(operation))
}

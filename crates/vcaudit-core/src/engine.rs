use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::adapters::{MockComparableCompanySource, MockMarketIndexSource};
use crate::data_source::{ComparableCompanySource, MarketIndexSource};
use crate::methodology::{
    ComparableCompanies, LastRoundMarketAdjusted, Methodology, MethodologyContext,
};
use crate::{CoreError, EngineConfig, ValidationError, ValuationRequest, ValuationResult};

/// Registered methodology as listed by catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodologyInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Routes requests to registered methodologies.
///
/// Holds no per-request state, so a single engine can be shared across
/// threads behind an `Arc`.
#[derive(Clone)]
pub struct ValuationEngine {
    methodologies: HashMap<&'static str, Arc<dyn Methodology>>,
    context: MethodologyContext,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ValuationEngine {
    /// Engine over the in-memory mock datasets.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_sources(
            config,
            Arc::new(MockMarketIndexSource::default()),
            Arc::new(MockComparableCompanySource::default()),
        )
    }

    pub fn with_sources(
        config: EngineConfig,
        index_source: Arc<dyn MarketIndexSource>,
        comps_source: Arc<dyn ComparableCompanySource>,
    ) -> Self {
        let methodologies: [Arc<dyn Methodology>; 2] = [
            Arc::new(LastRoundMarketAdjusted::new(config.default_public_index)),
            Arc::new(ComparableCompanies),
        ];

        Self {
            methodologies: methodologies
                .into_iter()
                .map(|methodology| (methodology.name(), methodology))
                .collect(),
            context: MethodologyContext::new(index_source, comps_source),
        }
    }

    pub fn context(&self) -> &MethodologyContext {
        &self.context
    }

    /// Registered methodology names, sorted.
    pub fn available_methodologies(&self) -> Vec<&'static str> {
        let mut names = self.methodologies.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn methodology_catalog(&self) -> Vec<MethodologyInfo> {
        self.available_methodologies()
            .into_iter()
            .filter_map(|name| self.methodologies.get(name))
            .map(|methodology| MethodologyInfo {
                name: methodology.name(),
                description: methodology.description(),
            })
            .collect()
    }

    pub fn evaluate(&self, request: &ValuationRequest) -> Result<ValuationResult, CoreError> {
        let methodology = self.methodologies.get(request.methodology()).ok_or_else(|| {
            ValidationError::UnknownMethodology {
                name: request.methodology().to_owned(),
                available: self
                    .available_methodologies()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            }
        })?;

        tracing::debug!(
            company = request.company_name(),
            methodology = methodology.name(),
            "dispatching valuation"
        );

        let result = methodology.valuate(request, &self.context)?;

        tracing::info!(
            request_id = %result.request_id(),
            company = request.company_name(),
            methodology = methodology.name(),
            fair_value = %result.valuation_result.estimated_fair_value.amount,
            "valuation completed"
        );

        Ok(result)
    }

    /// Parse `payload` into a request and evaluate it.
    pub fn evaluate_value(&self, payload: &Value) -> Result<ValuationResult, CoreError> {
        let request = ValuationRequest::from_value(payload)?;
        self.evaluate(&request)
    }
}

impl std::fmt::Debug for ValuationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuationEngine")
            .field("methodologies", &self.available_methodologies())
            .field("context", &self.context)
            .finish()
    }
}

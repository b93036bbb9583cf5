use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use time::Date;
use uuid::Uuid;

use crate::domain::{iso_date, Citation, MonetaryAmount, UtcDateTime};

/// Version stamped into every result's audit metadata.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Deterministic part of a valuation: identical requests produce identical
/// values here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub company_name: String,
    pub methodology: String,
    #[serde(with = "iso_date")]
    pub as_of_date: Date,
    pub estimated_fair_value: MonetaryAmount,
    pub assumptions: Vec<String>,
    pub inputs_used: Map<String, Value>,
    pub citations: Vec<Citation>,
    pub derivation_steps: Vec<String>,
    pub confidence_indicators: Map<String, Value>,
}

/// Per-invocation identity of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMetadata {
    pub request_id: Uuid,
    pub generated_at_utc: UtcDateTime,
    pub engine_version: String,
}

impl AuditMetadata {
    pub fn fresh() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            generated_at_utc: UtcDateTime::now(),
            engine_version: String::from(ENGINE_VERSION),
        }
    }
}

/// Auditable valuation output as serialized to callers and the run store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub valuation_result: Valuation,
    pub audit_metadata: AuditMetadata,
}

impl ValuationResult {
    /// Wrap `valuation` with a new request id and generation timestamp.
    pub fn new(valuation: Valuation) -> Self {
        Self {
            valuation_result: valuation,
            audit_metadata: AuditMetadata::fresh(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.audit_metadata.request_id
    }

    pub fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// JSON number for a decimal, applied only at the presentation boundary.
pub fn decimal_value(value: Decimal) -> Value {
    value
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

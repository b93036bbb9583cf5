use serde_json::Value;
use time::Date;

use crate::validation::{self, FieldKind, Payload};
use crate::ValidationError;

/// Parsed valuation request.
///
/// Only built through [`ValuationRequest::from_payload`] so every instance
/// has a non-empty company name, a methodology key, an inputs object and a
/// valid as-of date. The inputs stay untyped; each methodology validates its
/// own fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationRequest {
    company_name: String,
    methodology: String,
    inputs: Payload,
    as_of_date: Date,
}

impl ValuationRequest {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(payload) => Self::from_payload(payload),
            other => Err(ValidationError::TypeMismatch {
                field: String::from("request"),
                expected: String::from(FieldKind::Object.as_str()),
                actual: validation::kind_name(other),
            }),
        }
    }

    pub fn from_payload(payload: &Payload) -> Result<Self, ValidationError> {
        let company_name = validation::require_text(payload, "company_name")?;
        let methodology = validation::require_field(payload, "methodology", &[FieldKind::String])?;
        let inputs = validation::require_field(payload, "inputs", &[FieldKind::Object])?;
        let as_of_date = validation::require_field(payload, "as_of_date", &[FieldKind::String])
            .and_then(validation::parse_date)?;

        Ok(Self {
            company_name: company_name.to_owned(),
            methodology: methodology.as_str().unwrap_or_default().to_owned(),
            inputs: inputs.as_object().cloned().unwrap_or_default(),
            as_of_date,
        })
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn methodology(&self) -> &str {
        &self.methodology
    }

    pub fn inputs(&self) -> &Payload {
        &self.inputs
    }

    pub fn as_of_date(&self) -> Date {
        self.as_of_date
    }
}

//! Field extraction and parsing helpers for untyped request payloads.
//!
//! Payloads arrive as JSON objects. These helpers pull individual fields out
//! of them with the domain's type rules applied: booleans never pass as
//! numbers, amounts are never negative, and numbers become base-10 decimals
//! without a detour through binary floating point.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use time::Date;

use crate::domain::iso_date;
use crate::ValidationError;

/// Untyped key/value payload as parsed from JSON.
pub type Payload = Map<String, Value>;

/// JSON value kinds a field may be required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Object,
}

impl FieldKind {
    /// Accepted kinds for amounts: integers, floats and numeric strings.
    pub const NUMERIC: [Self; 3] = [Self::Integer, Self::Float, Self::String];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Object => "object",
        }
    }

    const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Float => value.is_f64(),
            Self::Boolean => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

/// Human-readable kind of a JSON value, used in type mismatch messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Return the value under `key` if present, non-null and of one of the
/// `expected` kinds.
///
/// A boolean is rejected whenever a numeric kind is expected, even if a
/// boolean kind is listed as well.
pub fn require_field<'a>(
    payload: &'a Payload,
    key: &str,
    expected: &[FieldKind],
) -> Result<&'a Value, ValidationError> {
    let value = match payload.get(key) {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingField {
                field: key.to_owned(),
            })
        }
        Some(value) => value,
    };

    if value.is_boolean() && expected.iter().any(|kind| kind.is_numeric()) {
        return Err(ValidationError::BooleanNotNumeric {
            field: key.to_owned(),
        });
    }

    if expected.iter().any(|kind| kind.matches(value)) {
        return Ok(value);
    }

    Err(type_mismatch(key, expected, value))
}

/// Required non-empty text field.
pub fn require_text<'a>(payload: &'a Payload, key: &str) -> Result<&'a str, ValidationError> {
    let value = require_field(payload, key, &[FieldKind::String])?;
    let text = value
        .as_str()
        .ok_or_else(|| type_mismatch(key, &[FieldKind::String], value))?;
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: key.to_owned(),
        });
    }
    Ok(text)
}

/// Optional text field. Only an absent key yields `None`; an explicit null
/// or any other non-string value is a type mismatch.
pub fn optional_text<'a>(
    payload: &'a Payload,
    key: &str,
) -> Result<Option<&'a str>, ValidationError> {
    match payload.get(key) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(other) => Err(type_mismatch(key, &[FieldKind::String], other)),
    }
}

/// Optional non-negative decimal. Only an absent key yields `None`; an
/// explicit null fails like any other non-numeric value.
pub fn optional_decimal(payload: &Payload, key: &str) -> Result<Option<Decimal>, ValidationError> {
    payload
        .get(key)
        .map(|value| parse_decimal(value, key))
        .transpose()
}

/// Value under `key` unless it is absent or null.
pub fn optional_field<'a>(payload: &'a Payload, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|value| !value.is_null())
}

/// Parse a strict `YYYY-MM-DD` calendar date from a JSON string value.
pub fn parse_date(value: &Value) -> Result<Date, ValidationError> {
    let Value::String(raw) = value else {
        return Err(ValidationError::DateNotString {
            value: value.to_string(),
        });
    };
    iso_date::parse(raw)
}

/// Parse a non-negative decimal from an integer, float or numeric string.
pub fn parse_decimal(value: &Value, field: &str) -> Result<Decimal, ValidationError> {
    let parsed = match value {
        Value::Bool(_) => {
            return Err(ValidationError::BooleanNotNumeric {
                field: field.to_owned(),
            })
        }
        Value::Number(number) => {
            decimal_from_number(number).ok_or_else(|| out_of_range(field))?
        }
        Value::String(raw) => {
            let raw = raw.trim();
            match decimal_from_str(raw) {
                Some(parsed) => parsed,
                None if raw.parse::<f64>().is_ok_and(f64::is_finite) => {
                    return Err(out_of_range(field))
                }
                None => return Err(not_numeric(field)),
            }
        }
        _ => return Err(not_numeric(field)),
    };

    if parsed < Decimal::ZERO {
        return Err(ValidationError::NegativeValue {
            field: field.to_owned(),
        });
    }

    Ok(parsed)
}

fn decimal_from_number(number: &Number) -> Option<Decimal> {
    if let Some(value) = number.as_i64() {
        return Some(Decimal::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Some(Decimal::from(value));
    }
    // Shortest round-trip text of the float, so 3.14 parses as exactly 3.14.
    decimal_from_str(&number.to_string())
}

fn decimal_from_str(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn not_numeric(field: &str) -> ValidationError {
    ValidationError::NotNumeric {
        field: field.to_owned(),
    }
}

fn out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_owned(),
    }
}

fn type_mismatch(key: &str, expected: &[FieldKind], value: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        field: key.to_owned(),
        expected: expected
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        actual: kind_name(value),
    }
}

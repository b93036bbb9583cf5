//! Calendar dates in strict ISO-8601 `YYYY-MM-DD` form.
//!
//! Usable as a serde `with` module for `time::Date` fields.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse `YYYY-MM-DD`, rejecting other layouts and impossible dates such as Feb 30.
pub fn parse(raw: &str) -> Result<Date, ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        value: raw.to_owned(),
    };

    if raw.len() != 10 {
        return Err(invalid());
    }

    Date::parse(raw, ISO_DATE).map_err(|_| invalid())
}

pub fn format(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(*date))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse(&value).map_err(D::Error::custom)
}

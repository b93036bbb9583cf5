use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

/// UTC timestamp with whole-second precision, rendered as RFC3339 with a `Z` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    /// Current UTC time truncated to the second.
    pub fn now() -> Self {
        Self::truncated(OffsetDateTime::now_utc())
    }

    /// Parse an RFC3339 timestamp, normalizing any offset to UTC.
    pub fn parse(input: &str) -> Result<Self, time::error::Parse> {
        let parsed = OffsetDateTime::parse(input, &Rfc3339)?;
        Ok(Self::truncated(parsed))
    }

    fn truncated(value: OffsetDateTime) -> Self {
        let utc = value.to_offset(UtcOffset::UTC);
        Self(utc - time::Duration::nanoseconds(i64::from(utc.nanosecond())))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn format_rfc3339(self) -> String {
        let value = self.0;
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            value.year(),
            u8::from(value.month()),
            value.day(),
            value.hour(),
            value.minute(),
            value.second()
        )
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_sub_second_precision() {
        let parsed = UtcDateTime::parse("2026-02-18T09:30:15.987Z").expect("must parse");
        assert_eq!(parsed.format_rfc3339(), "2026-02-18T09:30:15Z");
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let parsed = UtcDateTime::parse("2026-02-18T10:30:15+01:00").expect("must parse");
        assert_eq!(parsed.to_string(), "2026-02-18T09:30:15Z");
    }

    #[test]
    fn now_has_whole_seconds() {
        assert_eq!(UtcDateTime::now().into_inner().nanosecond(), 0);
    }
}

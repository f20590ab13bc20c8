//! Release date wire format
//!
//! Request and response bodies carry dates as `DD.MM.YYYY` (e.g. `16.07.2006`),
//! the format the metadata service speaks. Query-string filters use ISO
//! `YYYY-MM-DD` and go through chrono's default serde instead.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

use super::ValidationError;

/// Body date format
pub const FORMAT: &str = "%d.%m.%Y";

/// Parse a body date.
pub fn parse(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), FORMAT).map_err(|_| ValidationError::InvalidFormat {
        field: "releaseDate",
        reason: "expected DD.MM.YYYY",
    })
}

/// Format a date for a body.
pub fn format(date: &NaiveDate) -> String {
    date.format(FORMAT).to_string()
}

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(date))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Same format for optional fields; `null` and absent both map to `None`.
pub mod option {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_some(&super::format(d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| super::parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

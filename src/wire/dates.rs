//! Date and timestamp representations used by the tax service schema.

use crate::engine::min_date;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date as the service sends it: `"YYYY-MM-DD"`, with
/// `"0001-01-01"` meaning "not specified".
///
/// Blank strings and `null` decode as the sentinel. Strings carrying a time
/// part decode by their date prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireDate(NaiveDate);

impl WireDate {
    pub fn new(date: NaiveDate) -> Self {
        WireDate(date)
    }

    pub fn unspecified() -> Self {
        WireDate(min_date())
    }

    /// Unset maps to the sentinel.
    pub fn from_local(date: Option<NaiveDate>) -> Self {
        date.map(WireDate).unwrap_or_default()
    }

    /// The sentinel (or anything before it) maps to unset.
    pub fn to_local(self) -> Option<NaiveDate> {
        if self.is_unspecified() {
            None
        } else {
            Some(self.0)
        }
    }

    pub fn is_unspecified(&self) -> bool {
        self.0 <= min_date()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::unspecified());
        }
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, DATE_FORMAT)
            .map(WireDate)
            .map_err(|e| format!("invalid date '{}': {}", raw, e))
    }
}

impl Default for WireDate {
    fn default() -> Self {
        Self::unspecified()
    }
}

impl fmt::Display for WireDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for WireDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WireDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        WireDate::parse(raw.as_deref().unwrap_or("")).map_err(de::Error::custom)
    }
}

/// Serde adapter for optional service timestamps.
///
/// Accepts RFC 3339 (any offset) or a bare `YYYY-MM-DDTHH:MM:SS[.f]`, which
/// is taken as UTC. Blank and `null` decode as `None`.
pub mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse(raw).map(Some).map_err(de::Error::custom),
        }
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
    }
}

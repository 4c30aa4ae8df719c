//! Date normalization for backend records.
//!
//! The backends serialize dates as `LocalDate` (`2024-02-01`), `LocalDateTime`
//! (`2024-02-01T09:30:00`) or full RFC 3339 timestamps depending on the
//! service. Everything is collapsed to a calendar date before it reaches the
//! merger so ordering never depends on string comparison.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Parse a backend date string into a calendar date.
///
/// Returns `None` for empty or unrecognized input.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }

    None
}

/// Serde deserializer that tolerates missing, null or malformed dates.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_lenient_date")]`.
/// A malformed date degrades to `None` instead of failing the whole payload.
pub fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|value| {
        let parsed = parse_record_date(value);
        if parsed.is_none() {
            tracing::debug!(value, "ignoring unparseable record date");
        }
        parsed
    }))
}

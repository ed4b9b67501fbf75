use chrono::{DateTime, NaiveDateTime};

use crate::error::{BikeshareError, Result};

/// Naive layouts accepted for trip timestamps, most common first.
const FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a trip timestamp such as `"2017-01-01 09:07:57"`.
///
/// Trip data is recorded in local city time without an offset, so the result
/// is naive. RFC 3339 strings are accepted too; their offset is dropped and
/// the wall-clock time kept.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(BikeshareError::TimestampParse(s.to_string()));
    }

    for fmt in FMTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive);
        }
    }

    let normalised = match trimmed.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => trimmed.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Ok(dt.naive_local());
    }

    Err(BikeshareError::TimestampParse(s.to_string()))
}

/// Render a timestamp in the layout the source files use.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

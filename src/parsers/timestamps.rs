//! Timestamp decoding shared by all decoders.
//!
//! Two encodings occur across export files: ISO-8601/RFC3339 strings, and
//! integer epochs in milliseconds or microseconds (sometimes stored as
//! strings). Everything is normalized to a UTC-anchored `DateTime<Utc>`.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

type JsonMap = serde_json::Map<String, Value>;

/// Parse an RFC3339/ISO-8601 date string, e.g. `2016-07-23T03:23:30.248Z`.
pub fn parse_utc_date(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid date string '{s}'"))
}

pub fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .with_context(|| format!("millisecond timestamp {ms} out of range"))
}

pub fn from_micros(us: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(us)
        .with_context(|| format!("microsecond timestamp {us} out of range"))
}

/// Millisecond epoch stored either as a JSON number or a decimal string
/// (older exports use strings).
pub fn parse_millis_value(value: &Value) -> Result<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let ms = n.as_i64().with_context(|| format!("invalid millisecond value {n}"))?;
            from_millis(ms)
        }
        Value::String(s) => {
            let ms: i64 =
                s.parse().with_context(|| format!("invalid millisecond string '{s}'"))?;
            from_millis(ms)
        }
        other => bail!("millisecond timestamp must be a number or string, got {other}"),
    }
}

/// Microsecond epoch stored as a JSON number or decimal string.
pub fn parse_micros_value(value: &Value) -> Result<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let us = n.as_i64().with_context(|| format!("invalid microsecond value {n}"))?;
            from_micros(us)
        }
        Value::String(s) => {
            let us: i64 =
                s.parse().with_context(|| format!("invalid microsecond string '{s}'"))?;
            from_micros(us)
        }
        other => bail!("microsecond timestamp must be a number or string, got {other}"),
    }
}

/// Decode the timestamp stored under `key` in a record.
///
/// Older schema versions store milliseconds under `"{key}Ms"`; newer ones
/// store an ISO string under `key` itself. The `Ms` suffix is the detection
/// rule, checked per record rather than per file.
pub fn parse_timestamp_key(map: &JsonMap, key: &str) -> Result<DateTime<Utc>> {
    let millis_key = format!("{key}Ms");
    if let Some(value) = map.get(&millis_key) {
        return parse_millis_value(value);
    }
    match map.get(key) {
        Some(Value::String(s)) => parse_utc_date(s),
        Some(other) => bail!("timestamp '{key}' must be an ISO string, got {other}"),
        None => bail!("no '{key}' key"),
    }
}

/// Date strings in legacy HTML exports, e.g. `Jan 1, 2021, 10:23:42 AM UTC`.
pub fn parse_html_date(s: &str) -> Result<DateTime<Utc>> {
    let trimmed = s.trim();
    let naive = trimmed.strip_suffix(" UTC").or_else(|| trimmed.strip_suffix(" GMT"));
    let Some(naive) = naive else {
        bail!("HTML date '{trimmed}' has no recognized timezone suffix");
    };
    NaiveDateTime::parse_from_str(naive, "%b %d, %Y, %I:%M:%S %p")
        .map(|dt| dt.and_utc())
        .with_context(|| format!("invalid HTML date string '{trimmed}'"))
}

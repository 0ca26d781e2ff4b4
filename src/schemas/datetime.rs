//! Lenient timestamp parsing for request bodies.
//!
//! Accepts RFC 3339 (`2024-12-16T10:00:00+02:00`), ISO 8601 with minute
//! precision (`2024-12-16T10:00Z`, `2024-12-16T10:00+02:00`), naive
//! date-times taken as UTC (`2024-12-16T10:00:00`, `2024-12-16 10:00`), plain
//! dates (`2024-12-16`, midnight UTC) and JSON numbers as Unix seconds.
//! Output is always RFC 3339 in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    // `Z` suffix on a shape RFC 3339 refuses, e.g. no seconds
    if let Some(naive) = raw.strip_suffix(['Z', 'z']).and_then(parse_naive) {
        return Ok(naive.and_utc());
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(naive) = parse_naive(raw) {
        return Ok(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("input '{}' is not a valid datetime", raw))
}

/// Unix seconds, fractions kept to the nanosecond.
pub fn from_unix_seconds(seconds: f64) -> Result<DateTime<Utc>, String> {
    let out_of_range = || format!("timestamp {} is out of range", seconds);
    if !seconds.is_finite() {
        return Err(out_of_range());
    }

    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return Err(out_of_range());
    }

    DateTime::from_timestamp(whole as i64, nanos).ok_or_else(out_of_range)
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Seconds(i64),
    Fractional(f64),
}

impl RawTimestamp {
    fn resolve(self) -> Result<DateTime<Utc>, String> {
        match self {
            RawTimestamp::Text(raw) => parse(&raw),
            RawTimestamp::Seconds(seconds) => DateTime::from_timestamp(seconds, 0)
                .ok_or_else(|| format!("timestamp {} is out of range", seconds)),
            RawTimestamp::Fractional(seconds) => from_unix_seconds(seconds),
        }
    }
}

/// `#[serde(with = "datetime::optional")]` for `Option<DateTime<Utc>>`.
pub mod optional {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&format(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawTimestamp>::deserialize(deserializer)?
            .map(|raw| raw.resolve().map_err(D::Error::custom))
            .transpose()
    }
}

/// Deserializer for update fields where `null` clears the stored timestamp.
pub fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional::deserialize(deserializer).map(Some)
}

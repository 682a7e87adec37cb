//! Field defaulting and coercion helpers shared by the converters

use bson::Bson;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Truthiness of a persisted value
///
/// Records were written by a dynamically typed service that defaulted fields
/// with `value || default`, so empty strings, `false`, `0` and `NaN` all read
/// as "absent" when a default is applied.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for i64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for Bson {
    fn is_truthy(&self) -> bool {
        match self {
            Bson::Null | Bson::Undefined => false,
            Bson::Boolean(b) => *b,
            Bson::String(s) => !s.is_empty(),
            Bson::Int32(i) => *i != 0,
            Bson::Int64(i) => *i != 0,
            Bson::Double(d) => d.is_truthy(),
            Bson::DateTime(dt) => dt.timestamp_millis() != 0,
            _ => true,
        }
    }
}

/// The value if it is truthy, `None` otherwise
pub fn truthy<T: Truthy + Clone>(value: &Option<T>) -> Option<T> {
    value.as_ref().filter(|v| v.is_truthy()).cloned()
}

/// The value if it is truthy, `default` otherwise
pub fn truthy_or<T: Truthy + Clone>(value: &Option<T>, default: T) -> T {
    truthy(value).unwrap_or(default)
}

/// Coerce a raw persisted timestamp, keeping every non-null value
///
/// Accepts BSON datetimes, RFC 3339 or `YYYY-MM-DD` strings, and numbers
/// holding milliseconds since the Unix epoch.
pub fn coerce_timestamp_raw(value: Option<&Bson>) -> Result<Option<DateTime<Utc>>, String> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value {
        Bson::Null | Bson::Undefined => Ok(None),
        Bson::DateTime(dt) => from_millis(dt.timestamp_millis()).map(Some),
        Bson::Int32(ms) => from_millis(i64::from(*ms)).map(Some),
        Bson::Int64(ms) => from_millis(*ms).map(Some),
        Bson::Double(ms) if ms.is_finite() => from_millis(*ms as i64).map(Some),
        Bson::String(s) => parse_timestamp(s).map(Some),
        other => Err(format!("expected date, received {:?}", other.element_type())),
    }
}

/// Coerce a raw persisted timestamp, treating falsy values as absent
pub fn coerce_timestamp(value: Option<&Bson>) -> Result<Option<DateTime<Utc>>, String> {
    match value {
        Some(v) if v.is_truthy() => coerce_timestamp_raw(Some(v)),
        _ => Ok(None),
    }
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, String> {
    DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| format!("invalid date: {} ms", ms))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(format!("invalid date: '{}'", s))
}

/// Deserialize an optional integer counter
///
/// Shell clients store numbers as doubles, so a whole double such as `3.0`
/// reads as `3`. Fractional values are rejected.
pub fn deserialize_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::Int32(i)) => Ok(Some(i64::from(i))),
        Some(Bson::Int64(i)) => Ok(Some(i)),
        Some(Bson::Double(d))
            if d.fract() == 0.0 && d >= i64::MIN as f64 && d < i64::MAX as f64 =>
        {
            Ok(Some(d as i64))
        }
        Some(Bson::Double(d)) => Err(D::Error::custom(format!(
            "expected an integer, received {}",
            d
        ))),
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, received {:?}",
            other.element_type()
        ))),
    }
}

/// Parse an optional string-literal field into its enum, `None` stays `None`
pub fn parse_literal<T>(value: Option<&String>) -> Result<Option<T>, String>
where
    T: FromStr<Err = String>,
{
    value.map(|s| s.parse::<T>()).transpose()
}

//! Lenient conversions out of a JSON value. Anything that does not convert
//! gives the zero value of the target type.

use crate::mapkit::{parse_bool, parse_prefixed_int};
use crate::timekit::{local_from_timestamp, utc_offset};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;
use std::fmt;

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    value: Value,
}

impl Cast {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn to_int(&self) -> i64 {
        self.to_int64()
    }

    /// Out of range values give 0.
    pub fn to_int32(&self) -> i32 {
        i32::try_from(self.to_int64()).unwrap_or_default()
    }

    /// Floats truncate. Strings accept `0x`, `0o`, `0b` prefixes and a
    /// zero fraction such as `"12.00"`.
    pub fn to_int64(&self) -> i64 {
        match &self.value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or_default(),
            Value::Bool(b) => *b as i64,
            Value::String(s) => {
                let s = s.trim();
                let s = strip_zero_fraction(s);
                parse_prefixed_int(s)
                    .ok()
                    .and_then(|n| i64::try_from(n).ok())
                    .unwrap_or_default()
            }
            _ => 0,
        }
    }

    pub fn to_float32(&self) -> f32 {
        self.to_float64() as f32
    }

    pub fn to_float64(&self) -> f64 {
        match &self.value {
            Value::Number(n) => n.as_f64().unwrap_or_default(),
            Value::Bool(b) => *b as i64 as f64,
            Value::String(s) => s.trim().parse().unwrap_or_default(),
            _ => 0.0,
        }
    }

    pub fn to_bool(&self) -> bool {
        match &self.value {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => parse_bool(s.trim()).unwrap_or_default(),
            _ => false,
        }
    }

    /// Unix seconds, RFC 3339, or a local datetime or date string in the
    /// [`crate::timekit`] offset.
    pub fn to_time(&self) -> Option<DateTime<FixedOffset>> {
        match &self.value {
            Value::Number(n) => local_from_timestamp(n.as_i64()?).ok(),
            Value::String(s) => parse_time(s.trim()),
            _ => None,
        }
    }
}

/// Strings as they are, numbers and bools in their plain form, null as "".
/// Arrays and maps are not converted.
impl fmt::Display for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            _ => Ok(()),
        }
    }
}

impl From<Value> for Cast {
    fn from(value: Value) -> Self {
        Self { value }
    }
}

fn strip_zero_fraction(s: &str) -> &str {
    match s.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') => {
            whole
        }
        _ => s,
    }
}

fn parse_time(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    let offset = utc_offset();
    let naive = DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });
    match naive {
        Some(naive) => offset.from_local_datetime(&naive).single(),
        None => s.parse::<i64>().ok().and_then(|ts| local_from_timestamp(ts).ok()),
    }
}

// File: crates/chart-core/src/record.rs
// Summary: Survey timestamps and raw input records, validated at the model boundary.
// Notes:
// - Every `survey` value is normalized to UTC epoch milliseconds so ordering is total.
// - Records with a missing or non-comparable `survey` are rejected with the record index.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Survey timestamp as UTC epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyTime(i64);

impl SurveyTime {
    pub const fn from_millis(ms: i64) -> Self { Self(ms) }
    pub const fn as_millis(self) -> i64 { self.0 }

    /// Midnight UTC of the given calendar day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self::from_naive(date.and_hms_opt(0, 0, 0)?))
    }

    fn from_naive(dt: NaiveDateTime) -> Self {
        Self(dt.and_utc().timestamp_millis())
    }

    /// Parse the accepted textual forms: RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`,
    /// `MM/DD/YYYY`, or a bare epoch-millisecond integer.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(ms) = s.parse::<i64>() {
            return Some(Self(ms));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.timestamp_millis()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Some(Self::from_naive(dt));
        }
        for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return d.and_hms_opt(0, 0, 0).map(Self::from_naive);
            }
        }
        None
    }

    /// Normalize a JSON value; `None` when the value has no total order.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(ms) = n.as_i64() {
                    return Some(Self(ms));
                }
                let f = n.as_f64()?;
                let in_range = f >= i64::MIN as f64 && f <= i64::MAX as f64;
                (f.is_finite() && f.fract() == 0.0 && in_range).then(|| Self(f as i64))
            }
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl fmt::Display for SurveyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// One input observation: a survey timestamp plus arbitrary passthrough fields.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    pub survey: SurveyTime,
    pub fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new(survey: SurveyTime) -> Self {
        Self { survey, fields: Map::new() }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Validate one JSON object; `index` is reported back in errors.
    pub fn from_value(index: usize, value: Value) -> Result<Self, ValidationError> {
        let Value::Object(mut fields) = value else {
            return Err(ValidationError::NotAnObject { index });
        };
        let survey = match fields.remove("survey") {
            None | Some(Value::Null) => return Err(ValidationError::MissingSurvey { index }),
            Some(v) => SurveyTime::from_json(&v)
                .ok_or_else(|| ValidationError::InvalidSurvey { index, value: v.to_string() })?,
        };
        Ok(Self { survey, fields })
    }
}

/// Parse a JSON array of record objects.
pub fn parse_records_json(input: &str) -> Result<Vec<RawRecord>, ValidationError> {
    let values: Vec<Value> = serde_json::from_str(input)?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| RawRecord::from_value(i, v))
        .collect()
}

//! Metric values and best-effort numeric coercion
//!
//! Report cells are strings. Extractors try to turn them into numbers, and keep
//! the original text whenever that fails. None of the functions here can fail.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static INTEGER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+$").expect("integer pattern is valid"));

// 2^63 is exact in f64; i64::MAX is not.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// A single extracted value: either a number or the cell text as found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Int(i) => Some(*i as f64),
            MetricValue::Float(f) => Some(*f),
            MetricValue::Text(_) => None,
        }
    }

    /// Text view of the value, if it was kept as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, MetricValue::Text(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" on whole floats
            MetricValue::Float(v) => write!(f, "{:?}", v),
            MetricValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Int(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Float(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

/// Parse a cell as a finite float, ignoring surrounding whitespace.
pub fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to two decimals, halves away from zero.
///
/// Values too large to scale are returned unchanged; they carry no fraction.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Float rounded to two decimals when the cell parses, the cell text otherwise.
pub fn rounded_or_text(text: &str) -> MetricValue {
    match parse_float(text) {
        Some(v) => MetricValue::Float(round2(v)),
        None => MetricValue::Text(text.to_string()),
    }
}

/// Integer truncation of the cell's float form when it parses, the cell text otherwise.
///
/// Values outside the `i64` range keep their text.
pub fn truncated_or_text(text: &str) -> MetricValue {
    match parse_float(text).map(f64::trunc) {
        Some(v) if (I64_LOWER..I64_UPPER).contains(&v) => MetricValue::Int(v as i64),
        _ => MetricValue::Text(text.to_string()),
    }
}

/// Integer when the cell is written as one, float when it parses as one, text otherwise.
///
/// Unlike [`rounded_or_text`] no rounding is applied.
pub fn coerce_scalar(text: &str) -> MetricValue {
    let trimmed = text.trim();
    if INTEGER_REGEX.is_match(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return MetricValue::Int(i);
        }
    }
    match parse_float(trimmed) {
        Some(v) => MetricValue::Float(v),
        None => MetricValue::Text(trimmed.to_string()),
    }
}

//! Best-effort numeric extraction from heterogeneous corpus fields.
//!
//! Source values mix plain numbers, ranges ("18.5-19.6"), delimiter-separated
//! lists, and numbers embedded in free text ("Peak: 150, Background: 70").
//! The rules below are ordered; the first one that produces a number wins,
//! and a value no rule can interpret is kept verbatim as text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::FieldValue;

/// Optionally signed decimal, optional fractional part.
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+\.?\d*").unwrap());

/// Cleans one raw corpus field. Numeric JSON values pass straight through;
/// strings go through the rule cascade; anything else is stringified first.
pub fn extract_field(value: &serde_json::Value) -> FieldValue {
    match value {
        serde_json::Value::Null => FieldValue::Missing,
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => FieldValue::Number(f),
            None => FieldValue::Text(n.to_string()),
        },
        serde_json::Value::String(s) => extract_numeric_value(s),
        other => extract_numeric_value(&other.to_string()),
    }
}

/// The rule cascade. Deterministic and side-effect-free; parse failures are
/// swallowed and fall through to the next rule.
pub fn extract_numeric_value(value: &str) -> FieldValue {
    if value.is_empty() {
        return FieldValue::Missing;
    }

    // A range like "18.5-19.6" collapses to its midpoint. A leading minus
    // sign means a negative number, not a range.
    if value.contains('-') && !value.starts_with('-') {
        let parts: Vec<&str> = value.split('-').collect();
        if parts.len() == 2 {
            if let (Ok(low), Ok(high)) = (
                parts[0].trim().parse::<f64>(),
                parts[1].trim().parse::<f64>(),
            ) {
                return FieldValue::Number((low + high) / 2.0);
            }
        }
    }

    // Multi-value fields: mean of the first number found in each segment.
    if value.contains(';') {
        if let Some(mean) = mean_of_segments(value.split(';')) {
            return FieldValue::Number(mean);
        }
    }
    if value.contains(',') {
        if let Some(mean) = mean_of_segments(value.split(',')) {
            return FieldValue::Number(mean);
        }
    }

    // Free text with an embedded reading: take the first number.
    if let Some(found) = NUMBER_RE.find(value) {
        if let Ok(number) = found.as_str().parse::<f64>() {
            return FieldValue::Number(number);
        }
    }

    // Plain numeric formats the scan above misses (e.g. ".5", "1e3").
    if let Ok(number) = value.parse::<f64>() {
        if number.is_finite() {
            return FieldValue::Number(number);
        }
    }

    FieldValue::Text(value.to_string())
}

fn mean_of_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Option<f64> {
    let mut values = Vec::new();
    for segment in segments {
        if let Some(found) = NUMBER_RE.find(segment.trim()) {
            if let Ok(number) = found.as_str().parse::<f64>() {
                values.push(number);
            }
        }
    }
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

//! Handle the translation of literal values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use query_engine_descriptor::descriptor::ast::Value;
use query_engine_metadata::metadata::ScalarKind;

use crate::translation::error::Error;

/// Parse a decimal number literal, e.g. `42`, `-1.5` or `2e3`.
///
/// Empty strings, surrounding whitespace, digit separators, hexadecimal and non-finite
/// literals (`inf`, `NaN`) are rejected. Integers that fit in an `i64` stay integers.
pub fn parse_number(raw: &str) -> Option<serde_json::Number> {
    let well_formed = raw.chars().any(|c| c.is_ascii_digit())
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !well_formed {
        return None;
    }
    if let Ok(integer) = raw.parse::<i64>() {
        return Some(integer.into());
    }
    raw.parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .and_then(serde_json::Number::from_f64)
}

/// Date and time forms without an offset, taken as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a date literal: RFC 3339, or a date and time without offset (taken as UTC), or a
/// plain date (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|timestamp| timestamp.and_utc())
}

/// Coerce a filter value to the declared kind of its field.
pub fn coerce(field: &str, kind: ScalarKind, raw: &str) -> Result<Value, Error> {
    match kind {
        ScalarKind::Number => parse_number(raw)
            .map(Value::Number)
            .ok_or_else(|| Error::invalid_value(field, "number")),
        ScalarKind::Date => parse_date(raw)
            .map(Value::Timestamp)
            .ok_or_else(|| Error::invalid_value(field, "date")),
        ScalarKind::String => Ok(Value::String(raw.to_string())),
    }
}

/// Coerce the comma-separated operand of a list operator. Only numeric fields are coerced,
/// elements of other fields stay strings.
pub fn coerce_list(field: &str, kind: ScalarKind, raw: &str) -> Result<Value, Error> {
    raw.split(',')
        .map(|element| match kind {
            ScalarKind::Number => coerce(field, kind, element),
            ScalarKind::String | ScalarKind::Date => Ok(Value::String(element.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// Interpret the value of a pass-through parameter: a JSON literal if it parses as one,
/// the raw string otherwise.
pub fn parse_literal(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map_or_else(|_| Value::String(raw.to_string()), Value::from)
}

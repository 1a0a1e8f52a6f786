//! Keys without a grammar of their own: the pagination window, `distinct`, `cursor`, and
//! anything else the client passes through.

use indexmap::IndexMap;

use query_engine_descriptor::descriptor::ast::{ParsedQuery, Value};

use super::values::parse_literal;
use crate::translation::error::Error;

/// Place a direct key on the descriptor.
pub fn apply_direct(query: &mut ParsedQuery, key: &str, raw: &str) -> Result<(), Error> {
    match key {
        "take" => query.take = Some(parse_integer(key, raw)?),
        "skip" => query.skip = Some(parse_integer(key, raw)?),
        "distinct" => query.distinct = parse_distinct(raw)?,
        "cursor" => query.cursor = parse_cursor(raw)?,
        "where" => {
            return Err(Error::InvalidSyntax {
                context: "query key",
                input: key.to_string(),
                expected: "filter.field=$operator:value",
            })
        }
        _ => {
            query.extra.insert(key.to_string(), parse_literal(raw));
        }
    }
    Ok(())
}

fn parse_integer(key: &str, raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>()
        .map_err(|_| Error::invalid_value(key, "integer"))
}

/// `distinct` is either a JSON array of field names or a comma-separated list.
fn parse_distinct(raw: &str) -> Result<Option<Vec<String>>, Error> {
    let fields = if raw.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<String>>(raw)
            .map_err(|_| Error::invalid_value("distinct", "list of field names"))?
    } else {
        raw.split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect()
    };
    Ok((!fields.is_empty()).then_some(fields))
}

fn parse_cursor(raw: &str) -> Result<Option<IndexMap<String, Value>>, Error> {
    if raw.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(fields)) => Ok(Some(
            fields
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        )),
        _ => Err(Error::invalid_value("cursor", "object")),
    }
}

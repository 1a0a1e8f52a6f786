//! Translate filter expressions (`$gt:5`) and logical compositions
//! (`age=$gt:5|name=$startsWith:A`) into WHERE trees.

use query_engine_descriptor::descriptor::ast::Where;
use query_engine_descriptor::descriptor::helpers::{nest, predicate};
use query_engine_metadata::metadata::{ComparisonOperator, FieldTypeMap};

use super::values::{coerce, coerce_list};
use crate::translation::error::Error;

/// The prefix of filter parameters, e.g. `filter.age`.
pub const FILTER_PREFIX: &str = "filter.";
/// Separates the sub-conditions of a logical composition.
pub const CONDITION_SEPARATOR: char = '|';

const CONDITION_FORMAT: &str = "field=$operator:value";

/// Translate the filter on a single field path.
///
/// The operator is everything up to the first `:`; the rest is the operand, which may
/// contain further colons.
pub fn parse_filter(path: &str, filter: &str, fields: &FieldTypeMap) -> Result<Where, Error> {
    let (token, raw_value) = filter.split_once(':').unwrap_or((filter, ""));
    let operator = ComparisonOperator::resolve(token)?;
    let kind = fields
        .lookup_scalar(path)
        .ok_or_else(|| Error::UnsupportedField(path.to_string()))?;

    let value = if operator.is_list() {
        coerce_list(path, kind, raw_value)?
    } else {
        coerce(path, kind, raw_value)?
    };

    Ok(nest(path, predicate(operator, value)))
}

/// A single `field=filter` sub-condition of a logical composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCondition<'a> {
    pub path: &'a str,
    pub filter: &'a str,
}

/// Split a logical composition into its sub-conditions, in order.
pub fn split_conditions(conditions: &str) -> Result<Vec<SubCondition<'_>>, Error> {
    conditions
        .split(CONDITION_SEPARATOR)
        .map(|condition| {
            let invalid = || Error::InvalidSyntax {
                context: "condition",
                input: condition.to_string(),
                expected: CONDITION_FORMAT,
            };
            let (field, filter) = condition.split_once('=').ok_or_else(invalid)?;
            if field.is_empty() || filter.is_empty() {
                return Err(invalid());
            }
            Ok(SubCondition {
                path: field.strip_prefix(FILTER_PREFIX).unwrap_or(field),
                filter,
            })
        })
        .collect()
}

/// Translate a logical composition into one WHERE tree per sub-condition.
pub fn parse_logical(conditions: &str, fields: &FieldTypeMap) -> Result<Vec<Where>, Error> {
    split_conditions(conditions)?
        .into_iter()
        .map(|condition| parse_filter(condition.path, condition.filter, fields))
        .collect()
}

//! The closed set of comparison operators accepted in filter expressions.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The complete list of supported comparison operators.
///
/// These must be kept in sync with the documentation examples.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    Contains,
    StartsWith,
    EndsWith,
    In,
    NotIn,
}

/// A filter used an operator token outside of the operator table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operator: {0}")]
pub struct UnknownOperator(pub String);

impl ComparisonOperator {
    /// The token used for the operator in a query string, e.g. `$gte`.
    pub fn token(self) -> &'static str {
        match self {
            Self::Equals => "$eq",
            Self::NotEquals => "$ne",
            Self::LessThan => "$lt",
            Self::LessThanOrEqualTo => "$lte",
            Self::GreaterThan => "$gt",
            Self::GreaterThanOrEqualTo => "$gte",
            Self::Contains => "$contains",
            Self::StartsWith => "$startsWith",
            Self::EndsWith => "$endsWith",
            Self::In => "$in",
            Self::NotIn => "$notIn",
        }
    }

    /// The name of the predicate understood by the data-access layer.
    pub fn predicate_name(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not",
            Self::LessThan => "lt",
            Self::LessThanOrEqualTo => "lte",
            Self::GreaterThan => "gt",
            Self::GreaterThanOrEqualTo => "gte",
            Self::Contains => "contains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::In => "in",
            Self::NotIn => "notIn",
        }
    }

    /// A short human readable description, used in API documentation.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "does not equal",
            Self::LessThan => "less than",
            Self::LessThanOrEqualTo => "less than or equal to",
            Self::GreaterThan => "greater than",
            Self::GreaterThanOrEqualTo => "greater than or equal to",
            Self::Contains => "contains",
            Self::StartsWith => "starts with",
            Self::EndsWith => "ends with",
            Self::In => "in the specified values",
            Self::NotIn => "not in the specified values",
        }
    }

    /// Example filter string using this operator, with placeholders for the values.
    pub fn example(self) -> String {
        if self.is_list() {
            format!("{}:[{{value1}}, {{value2}}]", self.token())
        } else {
            format!("{}:{{value}}", self.token())
        }
    }

    /// Whether the operator compares against a list of values rather than a single one.
    pub fn is_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Resolve an operator token from a query string.
    pub fn resolve(token: &str) -> Result<ComparisonOperator, UnknownOperator> {
        enum_iterator::all::<ComparisonOperator>()
            .find(|operator| operator.token() == token)
            .ok_or_else(|| UnknownOperator(token.to_string()))
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

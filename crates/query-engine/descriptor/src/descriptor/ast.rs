//! Type definitions of the query descriptor.
//!
//! The types serialize to the shape an ORM-style `findMany` call expects, e.g.
//! `{"where": {"age": {"gt": 5}}, "orderBy": [{"createdAt": "desc"}], "take": 10}`.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use query_engine_metadata::metadata::ComparisonOperator;

/// A translated query.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    /// Reserved for hand-built descriptors. Translation folds a `select` parameter into
    /// [`ParsedQuery::include`] and never sets this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Projection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Projection>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_: Option<Where>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<IndexMap<String, Value>>,
    /// Query parameters without a dedicated slot, passed through as-is.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ParsedQuery {
    /// The part of the query relevant for counting the matching records.
    pub fn count_query(&self) -> CountQuery {
        CountQuery {
            where_: self.where_.clone(),
        }
    }
}

/// The arguments of a `count` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CountQuery {
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_: Option<Where>,
}

/// Fields or relations flagged for inclusion in the result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Projection(pub IndexMap<String, bool>);

/// A WHERE tree: field name to condition.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Where(pub IndexMap<String, Condition>);

/// The condition placed on a single key of a WHERE tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Condition {
    /// A comparison on a scalar field, e.g. `{"gt": 5}`.
    Predicate(Predicate),
    /// Conditions on the fields of a nested entity.
    Relation(Where),
    /// The operands of a logical operator, keyed by `AND`, `OR` or `NOT`.
    Logical(Vec<Where>),
    /// Plain equality, e.g. `{"userId": 42}`.
    Equals(Value),
}

/// A single comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub operator: ComparisonOperator,
    pub value: Value,
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.operator.predicate_name(), &self.value)?;
        map.end()
    }
}

/// Logical operators combining a list of WHERE trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

impl LogicalOperator {
    /// The key the operands are placed under in the WHERE tree.
    pub fn key(self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Not => "NOT",
        }
    }
}

/// An ordered list of sort keys. The first element is the primary sort key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

/// A single sort key on a (possibly nested) field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByElement {
    pub path: Vec<String>,
    pub direction: OrderDirection,
}

/// A sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl Serialize for OrderBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.elements.len()))?;
        for element in &self.elements {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

/// `a.b:desc` serializes as `{"a": {"b": "desc"}}`.
impl Serialize for OrderByElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NestedDirection {
            path: &self.path,
            direction: self.direction,
        }
        .serialize(serializer)
    }
}

struct NestedDirection<'a> {
    path: &'a [String],
    direction: OrderDirection,
}

impl Serialize for NestedDirection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.path.split_first() {
            None => self.direction.serialize(serializer),
            Some((field, rest)) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(
                    field,
                    &NestedDirection {
                        path: rest,
                        direction: self.direction,
                    },
                )?;
                map.end()
            }
        }
    }
}

/// A literal value in the descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Serialized as an RFC 3339 UTC timestamp with millisecond precision.
    Timestamp(DateTime<Utc>),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Whether the value carries something to scope a query by.
    pub fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Timestamp(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::Array(items) => items.serialize(serializer),
            Value::Object(fields) => fields.serialize(serializer),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

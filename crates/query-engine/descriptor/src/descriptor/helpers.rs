//! Helpers for building and combining WHERE trees.

use indexmap::IndexMap;

use query_engine_metadata::metadata::{ComparisonOperator, PATH_SEPARATOR};

use super::ast::{Condition, Predicate, Value, Where};

/// A WHERE tree with no conditions.
pub fn empty_where() -> Where {
    Where(IndexMap::new())
}

/// A comparison condition.
pub fn predicate(operator: ComparisonOperator, value: Value) -> Condition {
    Condition::Predicate(Predicate { operator, value })
}

/// Place a condition under a dotted field path, wrapping it in one level per segment.
///
/// `nest("a.b", c)` is `{a: {b: c}}`.
pub fn nest(path: &str, condition: Condition) -> Where {
    match path.split_once(PATH_SEPARATOR) {
        None => Where(IndexMap::from([(path.to_string(), condition)])),
        Some((head, rest)) => Where(IndexMap::from([(
            head.to_string(),
            Condition::Relation(nest(rest, condition)),
        )])),
    }
}

impl Where {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.0.get(field)
    }

    /// Set a condition on a top-level field, replacing whatever was there.
    pub fn set(&mut self, field: impl Into<String>, condition: Condition) {
        self.0.insert(field.into(), condition);
    }

    /// Deep union of two WHERE trees. Conditions on the same nested entity are merged
    /// recursively; for anything else the condition from `other` replaces the existing one.
    pub fn merge(&mut self, other: Where) {
        for (field, condition) in other.0 {
            match (self.0.get_mut(&field), condition) {
                (Some(Condition::Relation(existing)), Condition::Relation(nested)) => {
                    existing.merge(nested);
                }
                (_, condition) => {
                    self.0.insert(field, condition);
                }
            }
        }
    }
}

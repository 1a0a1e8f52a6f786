//! Classify query-string keys by the role they play in the translation.

use query_engine_descriptor::descriptor::ast::LogicalOperator;
use query_params_configuration::Policy;

use super::filtering::FILTER_PREFIX;

/// Which projection list a key provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKey {
    Include,
    Select,
}

/// The role of a query-string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKey<'a> {
    /// `filter.<path>`
    Filter { path: &'a str },
    /// `$AND`, `$OR` or `$NOT`
    Logical(LogicalOperator),
    /// `orderBy`
    OrderBy,
    /// `include` or `select`
    Projection(ProjectionKey),
    /// A key naming a sensitive field.
    Sensitive(&'a str),
    /// Anything else, placed on the descriptor as-is.
    Direct(&'a str),
}

impl<'a> QueryKey<'a> {
    /// Classify a key. The patterns are tried in a fixed order, so e.g. a key that is both a
    /// filter and a sensitive field name is a filter.
    pub fn classify(key: &'a str, policy: &Policy) -> QueryKey<'a> {
        if let Some(path) = key.strip_prefix(FILTER_PREFIX) {
            return QueryKey::Filter { path };
        }
        match key {
            "$AND" => QueryKey::Logical(LogicalOperator::And),
            "$OR" => QueryKey::Logical(LogicalOperator::Or),
            "$NOT" => QueryKey::Logical(LogicalOperator::Not),
            "orderBy" => QueryKey::OrderBy,
            "include" => QueryKey::Projection(ProjectionKey::Include),
            "select" => QueryKey::Projection(ProjectionKey::Select),
            _ if policy.sensitive_fields.contains(key) => QueryKey::Sensitive(key),
            _ => QueryKey::Direct(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_precedence() {
        let policy = Policy::empty().with_sensitive_fields(["password", "orderBy"]);
        let classify = |key| QueryKey::classify(key, &policy);

        assert_eq!(
            classify("filter.profile.age"),
            QueryKey::Filter {
                path: "profile.age"
            }
        );
        assert_eq!(
            classify("filter.password"),
            QueryKey::Filter { path: "password" }
        );
        assert_eq!(classify("$OR"), QueryKey::Logical(LogicalOperator::Or));
        assert_eq!(classify("orderBy"), QueryKey::OrderBy);
        assert_eq!(
            classify("select"),
            QueryKey::Projection(ProjectionKey::Select)
        );
        assert_eq!(classify("password"), QueryKey::Sensitive("password"));
        assert_eq!(classify("take"), QueryKey::Direct("take"));
        // logical keys are case sensitive
        assert_eq!(classify("$or"), QueryKey::Direct("$or"));
    }
}

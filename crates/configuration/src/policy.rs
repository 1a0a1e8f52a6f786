//! The security policy governing which query parameters a client may use.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use indexmap::IndexSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Names of query keys and fields that get special treatment during translation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Query keys that cause the whole request to be rejected.
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub forbidden_keys: IndexSet<String>,
    /// Fields that may not be filtered on, selected or used as a direct key.
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub sensitive_fields: IndexSet<String>,
    /// Query keys that are silently dropped.
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub exclude_keys: IndexSet<String>,
    /// Fields whose value is taken from the request context and always scopes the query.
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub request_fields: IndexSet<String>,
}

fn to_set<I: IntoIterator<Item = S>, S: Into<String>>(names: I) -> IndexSet<String> {
    names.into_iter().map(Into::into).collect()
}

impl Policy {
    pub fn empty() -> Self {
        Policy::default()
    }

    #[must_use]
    pub fn with_forbidden_keys<S: Into<String>>(
        mut self,
        keys: impl IntoIterator<Item = S>,
    ) -> Self {
        self.forbidden_keys.extend(to_set(keys));
        self
    }

    #[must_use]
    pub fn with_sensitive_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.sensitive_fields.extend(to_set(fields));
        self
    }

    #[must_use]
    pub fn with_exclude_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.exclude_keys.extend(to_set(keys));
        self
    }

    #[must_use]
    pub fn with_request_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.request_fields.extend(to_set(fields));
        self
    }

    /// Union of two policies. Names from `self` come first.
    #[must_use]
    pub fn merge(&self, other: &Policy) -> Policy {
        let union = |ours: &IndexSet<String>, theirs: &IndexSet<String>| {
            ours.union(theirs).cloned().collect::<IndexSet<String>>()
        };
        Policy {
            forbidden_keys: union(&self.forbidden_keys, &other.forbidden_keys),
            sensitive_fields: union(&self.sensitive_fields, &other.sensitive_fields),
            exclude_keys: union(&self.exclude_keys, &other.exclude_keys),
            request_fields: union(&self.request_fields, &other.request_fields),
        }
    }

    /// Whether a field path is sensitive, either as a whole or through any of its segments.
    pub fn is_sensitive(&self, path: &str) -> bool {
        self.sensitive_fields.contains(path)
            || path
                .split(query_engine_metadata::metadata::PATH_SEPARATOR)
                .any(|segment| self.sensitive_fields.contains(segment))
    }
}

static DEFAULT_POLICY: LazyLock<ArcSwap<Policy>> =
    LazyLock::new(|| ArcSwap::from_pointee(Policy::default()));

/// Replace the process-wide default policy. In-flight translations keep the snapshot they
/// started with.
pub fn install_default_policy(policy: Policy) {
    tracing::info!(
        forbidden_keys = policy.forbidden_keys.len(),
        sensitive_fields = policy.sensitive_fields.len(),
        exclude_keys = policy.exclude_keys.len(),
        request_fields = policy.request_fields.len(),
        "installing default policy"
    );
    DEFAULT_POLICY.store(Arc::new(policy));
}

/// A snapshot of the process-wide default policy.
pub fn default_policy() -> Arc<Policy> {
    DEFAULT_POLICY.load_full()
}

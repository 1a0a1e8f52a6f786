//! Translate query-string parameters to a query descriptor.
//!
//! Translation runs in a fixed order:
//!
//! 1. reject the request if any forbidden key is present,
//! 2. drop excluded keys,
//! 3. validate the shape of the remaining parameters,
//! 4. translate each key according to its [`keys::QueryKey`] role,
//! 5. scope the query by the request fields of the policy.

pub mod direct;
pub mod filtering;
pub mod keys;
pub mod projection;
pub mod sorting;
pub mod values;

use std::sync::Arc;

use query_engine_descriptor::descriptor::ast::{Condition, ParsedQuery, Where};
use query_engine_descriptor::descriptor::helpers::empty_where;
use query_engine_metadata::metadata::FieldTypeMap;
use query_params_configuration::{default_policy, Policy};

use crate::translation::error::{Error, FieldAccess};
use crate::translation::helpers::Env;
use crate::translation::params::{QueryParams, RequestContext};
use crate::translation::validation::{ShapeValidator, StandardValidator};

use keys::{ProjectionKey, QueryKey};

/// Translate the query parameters of a request into a query descriptor.
pub fn translate(
    env: &Env,
    params: &QueryParams,
    context: &RequestContext,
) -> Result<ParsedQuery, Error> {
    let forbidden = env
        .policy
        .forbidden_keys
        .iter()
        .filter(|key| params.contains_key(key))
        .cloned()
        .collect::<Vec<_>>();
    if !forbidden.is_empty() {
        return Err(Error::ForbiddenKeys(forbidden));
    }

    let mut params = params.clone();
    params.retain(|key| !env.policy.exclude_keys.contains(key));

    env.validator.validate(&params).map_err(Error::Validation)?;

    let mut query = ParsedQuery::default();
    let mut where_ = empty_where();
    let mut include = None;
    let mut select = None;

    for (key, value) in params.iter() {
        match QueryKey::classify(key, env.policy) {
            QueryKey::Filter { path } => {
                env.check_not_sensitive(path, FieldAccess::Filter)?;
                where_.merge(filtering::parse_filter(path, value, env.fields)?);
            }
            QueryKey::Logical(operator) => {
                for condition in filtering::split_conditions(value)? {
                    env.check_not_sensitive(condition.path, FieldAccess::Filter)?;
                }
                let conditions = filtering::parse_logical(value, env.fields)?;
                where_.set(operator.key(), Condition::Logical(conditions));
            }
            QueryKey::OrderBy => {
                let order_by = sorting::parse_order_by(value)?;
                for element in &order_by.elements {
                    env.check_not_sensitive(&element.path.join("."), FieldAccess::Sort)?;
                }
                query.order_by = (!order_by.elements.is_empty()).then_some(order_by);
            }
            QueryKey::Projection(projection_key) => {
                let projection = projection::parse_include(value);
                for name in projection.0.keys() {
                    env.check_not_sensitive(name, FieldAccess::Projection)?;
                }
                let projection = (!projection.0.is_empty()).then_some(projection);
                match projection_key {
                    ProjectionKey::Include => include = projection,
                    ProjectionKey::Select => select = projection,
                }
            }
            QueryKey::Sensitive(field) => {
                return Err(Error::SensitiveField {
                    field: field.to_string(),
                    access: FieldAccess::Direct,
                })
            }
            QueryKey::Direct(key) => {
                direct::apply_direct(&mut query, key, value)?;
                check_direct_fields(env, &query, key)?;
            }
        }
    }

    // `select` takes precedence over `include`
    query.include = select.or(include);

    scope_by_request_fields(&mut where_, env.policy, context);
    query.where_ = (!where_.is_empty()).then_some(where_);

    tracing::debug!(descriptor = ?query, "translated query");

    Ok(query)
}

/// Reject `distinct` names and `cursor` keys that name a sensitive field.
fn check_direct_fields(env: &Env, query: &ParsedQuery, key: &str) -> Result<(), Error> {
    let names: Vec<&str> = match key {
        "distinct" => query
            .distinct
            .iter()
            .flatten()
            .map(String::as_str)
            .collect(),
        "cursor" => query
            .cursor
            .iter()
            .flat_map(|cursor| cursor.keys())
            .map(String::as_str)
            .collect(),
        _ => return Ok(()),
    };
    for name in names {
        env.check_not_sensitive(name, FieldAccess::Sort)?;
    }
    Ok(())
}

/// Bind the request fields present in the context, replacing any client filter on them.
fn scope_by_request_fields(where_: &mut Where, policy: &Policy, context: &RequestContext) {
    for field in &policy.request_fields {
        if let Some(value) = context.get(field).filter(|value| value.is_present()) {
            where_.set(field.clone(), Condition::Equals(value.clone()));
        }
    }
}

/// Translates queries against a single entity, owning its configuration.
///
/// Unless a policy is given explicitly, every translation reads the process default policy
/// installed with [`query_params_configuration::install_default_policy`].
#[derive(Clone)]
pub struct QueryTranslator {
    fields: Arc<FieldTypeMap>,
    policy: Option<Arc<Policy>>,
    endpoint_policy: Option<Policy>,
    validator: Arc<dyn ShapeValidator>,
}

impl QueryTranslator {
    pub fn new(fields: impl Into<Arc<FieldTypeMap>>) -> Self {
        QueryTranslator {
            fields: fields.into(),
            policy: None,
            endpoint_policy: None,
            validator: Arc::new(StandardValidator::new()),
        }
    }

    /// Use this policy instead of the process default.
    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<Arc<Policy>>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    /// Extend the base policy with names specific to one endpoint.
    #[must_use]
    pub fn with_endpoint_policy(mut self, policy: Policy) -> Self {
        self.endpoint_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl ShapeValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn fields(&self) -> &FieldTypeMap {
        &self.fields
    }

    /// The base policy merged with the endpoint policy.
    pub fn effective_policy(&self) -> Policy {
        let base = self.policy.clone().unwrap_or_else(default_policy);
        match &self.endpoint_policy {
            Some(endpoint_policy) => base.merge(endpoint_policy),
            None => Policy::clone(&base),
        }
    }

    pub fn translate(
        &self,
        params: &QueryParams,
        context: &RequestContext,
    ) -> Result<ParsedQuery, Error> {
        let policy = self.effective_policy();
        let env = Env::new(&self.fields, &policy, self.validator.as_ref());
        translate(&env, params, context)
    }
}

impl std::fmt::Debug for QueryTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("QueryTranslator")
            .field("fields", &self.fields)
            .field("policy", &self.policy)
            .field("endpoint_policy", &self.endpoint_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use query_params_configuration::install_default_policy;

    use super::*;

    #[test]
    fn translators_without_a_policy_read_the_installed_default() {
        let fields = FieldTypeMap::builder().number("id").string("name").build();
        let translator = QueryTranslator::new(fields);
        let params = QueryParams::parse("debug=1&take=5");

        install_default_policy(Policy::empty().with_forbidden_keys(["debug"]));
        let result = translator.translate(&params, &RequestContext::new());
        install_default_policy(Policy::empty());

        assert_eq!(result, Err(Error::ForbiddenKeys(vec!["debug".to_string()])));
        assert!(translator
            .translate(&params, &RequestContext::new())
            .is_ok());
    }
}

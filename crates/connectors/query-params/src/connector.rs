//! Translate and run queries against the entities of a configuration.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info_span, Instrument};

use query_engine_descriptor::descriptor::ast::ParsedQuery;
use query_engine_execution::{paginate, DataSource, Page};
use query_engine_translation::translation::params::{QueryParams, RequestContext};
use query_engine_translation::translation::query::QueryTranslator;
use query_params_configuration::{Configuration, Policy};

use crate::error::Error;
use crate::state::State;

/// Serves queries for every entity of a configuration.
#[derive(Debug, Clone)]
pub struct Connector {
    configuration: Arc<Configuration>,
    state: Arc<State>,
    translators: BTreeMap<String, QueryTranslator>,
}

impl Connector {
    pub fn new(configuration: impl Into<Arc<Configuration>>, state: State) -> Connector {
        let configuration = configuration.into();
        let policy = Arc::new(configuration.policy.clone());
        let translators = configuration
            .metadata
            .entities
            .0
            .iter()
            .map(|(entity, fields)| {
                let translator = QueryTranslator::new(fields.clone()).with_policy(policy.clone());
                (entity.clone(), translator)
            })
            .collect();
        Connector {
            configuration,
            state: Arc::new(state),
            translators,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Translate the query parameters of a request against one entity.
    pub fn translate(
        &self,
        entity: &str,
        params: &QueryParams,
        context: &RequestContext,
        endpoint_policy: Option<&Policy>,
    ) -> Result<ParsedQuery, Error> {
        self.translate_query(entity, params, context, endpoint_policy)
            .map_err(|err| {
                tracing::error!(
                    meta.signal_type = "log",
                    event.domain = "query_params",
                    event.name = "Translation error",
                    name = "Translation error",
                    entity,
                    kind = err.kind(),
                    body = %err,
                    error = true,
                );
                err
            })
    }

    /// Translate the query parameters, then fetch the page they describe from the data source.
    pub async fn query<S: DataSource>(
        &self,
        source: &S,
        entity: &str,
        params: &QueryParams,
        context: &RequestContext,
        endpoint_policy: Option<&Policy>,
    ) -> Result<Page<S::Record>, Error> {
        let query = self.translate(entity, params, context, endpoint_policy)?;
        paginate(source, &self.state.metrics, query)
            .instrument(info_span!("Query", entity))
            .await
            .map_err(|err| {
                let err = Error::from(err);
                tracing::error!(
                    meta.signal_type = "log",
                    event.domain = "query_params",
                    event.name = "Query error",
                    name = "Query error",
                    entity,
                    kind = err.kind(),
                    body = %err,
                    error = true,
                );
                err
            })
    }

    fn translate_query(
        &self,
        entity: &str,
        params: &QueryParams,
        context: &RequestContext,
        endpoint_policy: Option<&Policy>,
    ) -> Result<ParsedQuery, Error> {
        let translator = self
            .translators
            .get(entity)
            .ok_or_else(|| Error::UnknownEntity(entity.to_string()))?;
        let query = match endpoint_policy {
            Some(endpoint_policy) => translator
                .clone()
                .with_endpoint_policy(endpoint_policy.clone())
                .translate(params, context)?,
            None => translator.translate(params, context)?,
        };
        Ok(query)
    }
}

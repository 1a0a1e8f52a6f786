//! Transient state used by the connector.
//!
//! This is initialized on startup.

use thiserror::Error;
use tracing::{info_span, Instrument};

use query_engine_execution::metrics;

/// State for our connector.
#[derive(Debug, Clone)]
pub struct State {
    pub metrics: metrics::Metrics,
}

/// Register the connector metrics and wrap them inside a connector State.
pub async fn create_state(
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let metrics = async {
        let metrics_inner = metrics::Metrics::initialize(metrics_registry)
            .map_err(InitializationError::MetricsError)?;
        Ok(metrics_inner)
    }
    .instrument(info_span!("Setup metrics"))
    .await?;

    Ok(State { metrics })
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}

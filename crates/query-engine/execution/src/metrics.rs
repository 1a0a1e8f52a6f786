//! Metrics setup and update for paginated queries.

use prometheus::core::{AtomicU64, GenericCounter};

#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: GenericCounter<AtomicU64>,
    pub query_failures_total: GenericCounter<AtomicU64>,
    pub records_fetched_total: GenericCounter<AtomicU64>,
}

impl Metrics {
    /// Setup counters used to produce Prometheus metrics
    pub fn initialize(
        metrics_registry: &mut prometheus::Registry,
    ) -> Result<Self, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "query_params_query_total",
            "Total successful paginated queries.",
        )?;

        let query_failures_total = add_int_counter_metric(
            metrics_registry,
            "query_params_query_failures_total",
            "Total paginated queries that failed in the data source.",
        )?;

        let records_fetched_total = add_int_counter_metric(
            metrics_registry,
            "query_params_records_fetched_total",
            "Total records returned by paginated queries.",
        )?;

        Ok(Self {
            query_total,
            query_failures_total,
            records_fetched_total,
        })
    }

    pub fn record_success(&self, records: usize) {
        self.query_total.inc();
        self.records_fetched_total
            .inc_by(u64::try_from(records).unwrap_or(u64::MAX));
    }

    pub fn record_failure(&self) {
        self.query_failures_total.inc();
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, prometheus::Error> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

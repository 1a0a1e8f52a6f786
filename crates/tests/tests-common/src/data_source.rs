//! In-memory data sources that record the queries they receive.

use std::sync::Mutex;

use async_trait::async_trait;

use query_engine_descriptor::descriptor::ast::{CountQuery, ParsedQuery};
use query_engine_execution::DataSource;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("data source unavailable: {0}")]
pub struct DataSourceError(pub String);

/// Serves a fixed list of records. Filters are not evaluated: every record matches, and only
/// the window is applied.
#[derive(Debug, Default)]
pub struct InMemoryDataSource<T> {
    records: Vec<T>,
    find_many_calls: Mutex<Vec<serde_json::Value>>,
    count_calls: Mutex<Vec<serde_json::Value>>,
}

impl<T> InMemoryDataSource<T> {
    pub fn new(records: Vec<T>) -> Self {
        InMemoryDataSource {
            records,
            find_many_calls: Mutex::new(vec![]),
            count_calls: Mutex::new(vec![]),
        }
    }

    /// The serialized arguments of every `find_many` call so far.
    pub fn find_many_calls(&self) -> Vec<serde_json::Value> {
        self.find_many_calls.lock().unwrap().clone()
    }

    /// The serialized arguments of every `count` call so far.
    pub fn count_calls(&self) -> Vec<serde_json::Value> {
        self.count_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> DataSource for InMemoryDataSource<T> {
    type Record = T;
    type Error = DataSourceError;

    async fn find_many(&self, query: &ParsedQuery) -> Result<Vec<T>, DataSourceError> {
        self.find_many_calls
            .lock()
            .unwrap()
            .push(serde_json::to_value(query).unwrap());
        let skip = usize::try_from(query.skip.unwrap_or(0)).unwrap();
        let take = usize::try_from(query.take.unwrap_or(i64::MAX)).unwrap_or(usize::MAX);
        Ok(self.records.iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self, query: &CountQuery) -> Result<u64, DataSourceError> {
        self.count_calls
            .lock()
            .unwrap()
            .push(serde_json::to_value(query).unwrap());
        Ok(self.records.len() as u64)
    }
}

/// Which call a [`FailingDataSource`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    FindMany,
    Count,
}

/// A data source where one of the two calls always fails.
#[derive(Debug, Clone)]
pub struct FailingDataSource {
    pub failure: Failure,
}

#[async_trait]
impl DataSource for FailingDataSource {
    type Record = serde_json::Value;
    type Error = DataSourceError;

    async fn find_many(
        &self,
        _query: &ParsedQuery,
    ) -> Result<Vec<Self::Record>, DataSourceError> {
        match self.failure {
            Failure::FindMany => Err(DataSourceError("findMany timed out".to_string())),
            Failure::Count => Ok(vec![]),
        }
    }

    async fn count(&self, _query: &CountQuery) -> Result<u64, DataSourceError> {
        match self.failure {
            Failure::Count => Err(DataSourceError("count timed out".to_string())),
            Failure::FindMany => Ok(0),
        }
    }
}

//! Errors for query execution.

use thiserror::Error;

/// A boxed error raised by a data source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Query execution error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid pagination window: take={take}, skip={skip}.")]
    InvalidWindow { take: i64, skip: i64 },
    #[error("Query execution failed: {0}")]
    QueryExecution(#[source] SourceError),
}

impl Error {
    pub fn query_execution(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::QueryExecution(Box::new(err))
    }
}

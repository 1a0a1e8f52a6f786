//! Errors surfaced by the connector, and the response body they are reported with.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use query_engine_execution::error as execution;
use query_engine_translation::translation::error as translation;

/// Every error is caused by the client's input.
pub const CLIENT_ERROR_STATUS: u16 = 400;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),
    #[error(transparent)]
    Translation(#[from] translation::Error),
    #[error(transparent)]
    Execution(#[from] execution::Error),
}

impl Error {
    /// A stable name for the kind of error.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownEntity(_) => "UnknownEntity",
            Error::Translation(err) => err.kind(),
            Error::Execution(execution::Error::InvalidWindow { .. }) => "InvalidWindow",
            Error::Execution(execution::Error::QueryExecution(_)) => "QueryExecution",
        }
    }

    pub fn status_code(&self) -> u16 {
        CLIENT_ERROR_STATUS
    }
}

/// The body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    /// When the error was reported, as an RFC 3339 UTC timestamp.
    pub timestamp: String,
    /// The path of the failed request.
    pub path: String,
}

impl ErrorResponse {
    pub fn from_error(err: &Error, path: impl Into<String>) -> ErrorResponse {
        ErrorResponse::at(err, path, Utc::now())
    }

    pub fn at(err: &Error, path: impl Into<String>, timestamp: DateTime<Utc>) -> ErrorResponse {
        ErrorResponse {
            status_code: err.status_code(),
            message: err.to_string(),
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            path: path.into(),
        }
    }
}

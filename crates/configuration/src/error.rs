//! Errors that can occur while reading, validating or writing configuration.

use std::path::PathBuf;

use query_engine_metadata::metadata::InvalidFieldName;

/// The errors that can be thrown when processing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    IoErrorButStringified(String),

    #[error("unsupported configuration version: {0}")]
    UnsupportedVersion(String),
}

/// Errors raised while turning a parsed configuration into a runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid field types for entity '{entity}': {source}")]
    InvalidEntity {
        entity: String,
        #[source]
        source: InvalidFieldName,
    },
}

/// The errors that can be thrown when writing configuration to disk.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

//! Errors for translation.

use std::collections::BTreeMap;

use query_engine_metadata::metadata::UnknownOperator;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Forbidden keys found in query: {}", .0.join(", "))]
    ForbiddenKeys(Vec<String>),
    #[error("{} sensitive field {field} is not allowed.", .access.verb())]
    SensitiveField { field: String, access: FieldAccess },
    #[error("Invalid query parameters: {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    UnknownOperator(#[from] UnknownOperator),
    #[error("Unsupported field type for field: {0}")]
    UnsupportedField(String),
    #[error("Invalid {expected} value for field: {field}")]
    InvalidValue {
        field: String,
        expected: &'static str,
    },
    #[error("Invalid {context} format: {input}. Expected format: {expected}")]
    InvalidSyntax {
        context: &'static str,
        input: String,
        expected: &'static str,
    },
}

impl Error {
    /// A stable name for the kind of error, used in logs and error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ForbiddenKeys(_) => "ForbiddenKey",
            Error::SensitiveField { .. } => "SensitiveField",
            Error::Validation(_) => "ValidationError",
            Error::UnknownOperator(_) => "UnknownOperator",
            Error::UnsupportedField(_) => "UnsupportedField",
            Error::InvalidValue { .. } => "InvalidValue",
            Error::InvalidSyntax { .. } => "InvalidSyntax",
        }
    }

    pub(crate) fn invalid_value(field: impl Into<String>, expected: &'static str) -> Error {
        Error::InvalidValue {
            field: field.into(),
            expected,
        }
    }
}

/// How a sensitive field was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    Filter,
    Projection,
    /// Ordering, distinct or cursor positioning.
    Sort,
    Direct,
}

impl FieldAccess {
    fn verb(self) -> &'static str {
        match self {
            FieldAccess::Filter => "Filtering by",
            FieldAccess::Projection => "Selecting",
            FieldAccess::Sort => "Sorting by",
            FieldAccess::Direct => "Access to",
        }
    }
}

/// Validation messages per query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                first = false;
                write!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

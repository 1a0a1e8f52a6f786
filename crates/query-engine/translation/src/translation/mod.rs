//! Translate the incoming query parameters to a query descriptor for the data-access layer.

pub mod error;
pub mod helpers;
pub mod params;
pub mod query;
pub mod validation;

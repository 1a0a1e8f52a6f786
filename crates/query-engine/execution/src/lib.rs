//! Run a translated query against a data source and derive page metadata from the results.

pub mod error;
pub mod metrics;
pub mod pagination;

pub use pagination::{paginate, DataSource, Page, Window};

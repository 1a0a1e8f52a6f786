//! Fixtures and helpers shared by the test suites of every crate.

pub mod data_source;
pub mod deployment;
pub mod fixtures;

//! Deployment functions used across test cases.

pub mod helpers;

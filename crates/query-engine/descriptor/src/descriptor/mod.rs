//! The structured query descriptor produced by translation and consumed by a data-access layer.

pub mod ast;
pub mod helpers;

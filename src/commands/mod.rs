//! Commands module - CLI command implementations.

pub mod migrate;
pub mod serve;

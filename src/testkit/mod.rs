//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`]: builders for shards, catalogs, recipes and quotes.
//! - [`fixtures`]: source files for the Wither fusion scenario.

pub mod domain;
pub mod fixtures;

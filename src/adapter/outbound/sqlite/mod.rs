//! SQLite persistence adapters.
//!
//! [`SqliteStore`] implements the recipe, quote and profit store ports
//! against a single database file using Diesel ORM.

pub mod database;
mod profits;
mod quotes;
mod store;

pub use store::SqliteStore;

//! SQLite database modules.
//!
//! Provides database connection management, schema definitions, DDL and
//! Diesel model types for SQLite persistence.

pub mod connection;
pub mod ddl;
pub mod model;
pub mod schema;

//! Outbound adapters (driven side).

pub mod file;
pub mod hypixel;
pub mod sqlite;

//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the quote supplier and the persisted tables.

pub mod quote;
pub mod store;

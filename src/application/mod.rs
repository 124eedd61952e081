//! Application services (use cases).
//!
//! The pure stages (`parser`, `resolver`, `profit`, `rank`) take and return
//! domain values. `build`, `market` and `pipeline` sequence them against the
//! outbound ports.

pub mod build;
pub mod market;
pub mod parser;
pub mod pipeline;
pub mod profit;
pub mod rank;
pub mod resolver;

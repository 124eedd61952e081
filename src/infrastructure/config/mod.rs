//! Infrastructure configuration modules.

pub mod logging;
pub mod market;
pub mod profit;
pub mod settings;
pub mod sources;

pub use settings::Config;

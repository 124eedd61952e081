//! Domain validation errors for core domain types.
//!
//! Returned when a value read from a source or configuration does not map onto
//! a domain type.
//!
//! # Examples
//!
//! ```
//! use shardsmith::domain::error::DomainError;
//! use shardsmith::domain::Rarity;
//!
//! let result: Result<Rarity, DomainError> = "Ultra".parse();
//! assert!(matches!(result, Err(DomainError::UnknownRarity { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rarity names must be one of the six known tiers.
    #[error("unknown rarity '{value}'")]
    UnknownRarity {
        /// The rejected input.
        value: String,
    },

    /// Price sides are either `buy` or `sell`.
    #[error("unknown price side '{value}', expected 'buy' or 'sell'")]
    UnknownPriceSide {
        /// The rejected input.
        value: String,
    },

    /// Lookups by shard name must hit the stored catalog.
    #[error("unknown shard '{name}'")]
    UnknownShard {
        /// Display name or product id that was looked up.
        name: String,
    },
}

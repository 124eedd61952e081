//! Storage- and transport-agnostic domain types.

pub mod error;
mod id;
mod profit;
mod quote;
mod rarity;
mod recipe;
mod shard;

pub use id::ProductId;
pub use profit::{IngredientLine, ProfitEntry};
pub use quote::{MarketQuote, PriceSide, QuoteOrigin, QuoteSnapshot};
pub use rarity::Rarity;
pub use recipe::{FusionKey, FusionRecord, FusionRow, ProcessedRecipe, INPUT_COLUMNS, OUTPUT_COLUMNS};
pub use shard::{NameCorrections, ShardCatalog, ShardMetadata};

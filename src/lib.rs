//! Shardsmith - shard fusion profit calculator for the SkyBlock bazaar.
//!
//! Turns the community fusion list into a persisted recipe store, prices every
//! recipe against a bazaar quote snapshot, and ranks the results.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Shards, rarities, recipes, quotes and profit entries
//! - **`application`** - Parser, identity resolver, profit engine, ranker and
//!   the use cases that sequence them
//! - **`port`** - Traits for quote sources and the recipe/quote/profit stores
//! - **`adapter`** - SQLite stores, the Hypixel client, file sources and the CLI
//! - **`infrastructure`** - Configuration loading and logging
//!
//! # Pipeline
//!
//! ```text
//! fusion CSV ─► parser ─► FusionRecord ─► resolver ─► ProcessedRecipe ─► store
//!                                            ▲
//!                             shard metadata ┘
//!
//! store + QuoteSnapshot ─► profit engine ─► ProfitEntry ─► ranker ─► report
//! ```
//!
//! # Example
//!
//! ```
//! use shardsmith::application::parser::parse;
//! use shardsmith::domain::FusionRow;
//!
//! let rows = [FusionRow::new(["x2 Zombie", ""], ["x1 Wither (mythic)", "", ""])];
//! let records = parse(&rows);
//! assert_eq!(records[0].output_item, "Wither");
//! assert_eq!(records[0].quantity_1, 2);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

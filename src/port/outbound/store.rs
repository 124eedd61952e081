//! Persistence ports for the recipe, quote and profit tables.
//!
//! Every write replaces its table wholesale. There is no incremental path.

use crate::domain::{FusionRecord, ProcessedRecipe, ProfitEntry, QuoteSnapshot, ShardCatalog};
use crate::error::Result;

/// Row counts written by a rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    pub shards: usize,
    pub raw_recipes: usize,
    pub processed_recipes: usize,
}

/// Storage operations for the shard lookup and recipe tables.
pub trait RecipeStore {
    /// Drop and recreate the lookup, raw and processed tables.
    ///
    /// Each table is replaced inside its own transaction.
    fn rebuild(
        &self,
        catalog: &ShardCatalog,
        raw: &[FusionRecord],
        processed: &[ProcessedRecipe],
    ) -> Result<RebuildSummary>;

    /// Load the shard lookup table.
    fn load_catalog(&self) -> Result<ShardCatalog>;

    /// Load processed recipes in their stored order.
    fn load_processed(&self) -> Result<Vec<ProcessedRecipe>>;

    /// Processed recipes consuming `product_id`, with their recipe ids.
    fn recipes_using(&self, product_id: &str) -> Result<Vec<(usize, ProcessedRecipe)>>;
}

/// Storage operations for the last captured quote snapshot.
pub trait QuoteStore {
    /// Replace the stored snapshot. Returns the number of quotes written.
    fn replace_quotes(&self, snapshot: &QuoteSnapshot) -> Result<usize>;

    /// Load the stored snapshot.
    fn load_quotes(&self) -> Result<QuoteSnapshot>;
}

/// Storage operations for ranked profit results.
pub trait ProfitStore {
    /// Replace stored results with `entries`, keeping their order.
    fn replace_profits(&self, entries: &[ProfitEntry]) -> Result<usize>;

    /// Load stored results in the order they were written.
    fn load_profits(&self) -> Result<Vec<ProfitEntry>>;
}

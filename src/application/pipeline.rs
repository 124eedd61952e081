//! Profit run and shard usage lookup over the persisted recipe store.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::info;

use super::profit::{ProfitEngine, ProfitOptions, SkippedRecipe};
use super::rank::{rank, RankWeights};
use crate::domain::{ProcessedRecipe, ProfitEntry, QuoteOrigin, QuoteSnapshot, ShardCatalog};
use crate::error::Result;
use crate::port::outbound::store::{ProfitStore, RecipeStore};

/// Ranked result of one profit run.
#[derive(Debug, Clone)]
pub struct ProfitReport {
    /// Entries in ranked order, as persisted.
    pub entries: Vec<ProfitEntry>,
    pub skipped: Vec<SkippedRecipe>,
    pub unresolved: BTreeSet<String>,
    pub recipes: usize,
    pub origin: QuoteOrigin,
    pub captured_at: DateTime<Utc>,
}

/// Price every stored recipe against `quotes`, rank, and persist the ranking.
///
/// # Errors
/// Fails when the recipe tables cannot be read or the results cannot be written.
pub fn run_profits(
    recipes: &dyn RecipeStore,
    results: &dyn ProfitStore,
    quotes: &QuoteSnapshot,
    options: ProfitOptions,
    weights: RankWeights,
) -> Result<ProfitReport> {
    let catalog = recipes.load_catalog()?;
    let processed = recipes.load_processed()?;

    let run = ProfitEngine::new(&catalog, options).compute(&processed, quotes);
    let entries = rank(run.entries, weights);
    results.replace_profits(&entries)?;

    info!(
        recipes = processed.len(),
        profitable = entries.iter().filter(|e| e.profit > 0.0).count(),
        skipped = run.skipped.len(),
        origin = %quotes.origin(),
        "Profit run complete"
    );

    Ok(ProfitReport {
        entries,
        skipped: run.skipped,
        unresolved: run.unresolved,
        recipes: processed.len(),
        origin: quotes.origin(),
        captured_at: quotes.captured_at(),
    })
}

/// A stored recipe consuming the looked-up shard, with display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardUse {
    pub recipe_id: usize,
    pub ingredients: Vec<(String, u32)>,
    pub output_item: String,
    pub output_quantity: u32,
}

/// Recipes that consume the shard named `name` (display name or product id).
///
/// Returns `None` when the name is not in the stored catalog.
///
/// # Errors
/// Fails when the store cannot be read.
pub fn find_uses(store: &dyn RecipeStore, name: &str) -> Result<Option<Vec<ShardUse>>> {
    let catalog = store.load_catalog()?;
    let product_id = match catalog.product_id_for(name) {
        Some(id) => id.to_string(),
        None if catalog.by_product_id(name).is_some() => name.to_string(),
        None => return Ok(None),
    };

    let uses = store
        .recipes_using(&product_id)?
        .into_iter()
        .map(|(recipe_id, recipe)| describe(&catalog, recipe_id, &recipe))
        .collect();
    Ok(Some(uses))
}

fn describe(catalog: &ShardCatalog, recipe_id: usize, recipe: &ProcessedRecipe) -> ShardUse {
    let display = |id: &str| catalog.display_name(id).unwrap_or(id).to_string();
    ShardUse {
        recipe_id,
        ingredients: recipe
            .ingredients()
            .into_iter()
            .filter(|(item, _)| !item.is_empty())
            .map(|(item, amount)| (display(item), amount))
            .collect(),
        output_item: display(&recipe.output_item),
        output_quantity: recipe.output_quantity,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::{FusionRecord, MarketQuote, ProductId, Rarity, ShardMetadata};
    use crate::port::outbound::store::RebuildSummary;

    struct MemoryStore {
        catalog: ShardCatalog,
        processed: Vec<ProcessedRecipe>,
        profits: RefCell<Vec<ProfitEntry>>,
    }

    impl RecipeStore for MemoryStore {
        fn rebuild(
            &self,
            _catalog: &ShardCatalog,
            _raw: &[FusionRecord],
            _processed: &[ProcessedRecipe],
        ) -> Result<RebuildSummary> {
            Ok(RebuildSummary::default())
        }

        fn load_catalog(&self) -> Result<ShardCatalog> {
            Ok(self.catalog.clone())
        }

        fn load_processed(&self) -> Result<Vec<ProcessedRecipe>> {
            Ok(self.processed.clone())
        }

        fn recipes_using(&self, product_id: &str) -> Result<Vec<(usize, ProcessedRecipe)>> {
            Ok(self
                .processed
                .iter()
                .cloned()
                .enumerate()
                .filter(|(_, r)| r.uses_ingredient(product_id))
                .collect())
        }
    }

    impl ProfitStore for MemoryStore {
        fn replace_profits(&self, entries: &[ProfitEntry]) -> Result<usize> {
            *self.profits.borrow_mut() = entries.to_vec();
            Ok(entries.len())
        }

        fn load_profits(&self) -> Result<Vec<ProfitEntry>> {
            Ok(self.profits.borrow().clone())
        }
    }

    fn shard(name: &str, id: &str, rarity: Rarity) -> ShardMetadata {
        ShardMetadata {
            name: name.into(),
            product_id: ProductId::new(id),
            rarity,
            family: None,
            crafting_id: None,
        }
    }

    fn recipe(i1: &str, q1: u32, out: &str, out_qty: u32) -> ProcessedRecipe {
        ProcessedRecipe {
            quantity_1: q1,
            ingredient_1: i1.into(),
            quantity_2: 0,
            ingredient_2: String::new(),
            output_quantity: out_qty,
            output_item: out.into(),
        }
    }

    fn quote(buy: f64, volume: u64) -> MarketQuote {
        MarketQuote {
            buy_price: Some(buy),
            buy_orders: Some(1),
            sell_volume: volume,
            ..Default::default()
        }
    }

    fn store() -> MemoryStore {
        MemoryStore {
            catalog: ShardCatalog::new(vec![
                shard("Zombie", "SHARD_ZOMBIE", Rarity::Common),
                shard("Ghoul", "SHARD_GHOUL", Rarity::Common),
                shard("Wither", "SHARD_WITHER", Rarity::Mythic),
            ]),
            processed: vec![
                recipe("SHARD_ZOMBIE", 2, "SHARD_GHOUL", 2),
                recipe("SHARD_ZOMBIE", 2, "SHARD_WITHER", 1),
            ],
            profits: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn run_profits_ranks_and_persists() {
        let store = store();
        let quotes: QuoteSnapshot = [
            (ProductId::new("SHARD_ZOMBIE"), quote(2.0, 100)),
            (ProductId::new("SHARD_GHOUL"), quote(3.0, 10)),
            (ProductId::new("SHARD_WITHER"), quote(50.0, 7)),
        ]
        .into_iter()
        .collect();

        let report = run_profits(
            &store,
            &store,
            &quotes,
            ProfitOptions::default(),
            RankWeights::default(),
        )
        .unwrap();

        let order: Vec<_> = report.entries.iter().map(|e| e.recipe_id).collect();
        assert_eq!(order, vec![1, 0]);
        assert_eq!(report.entries[0].profit, 46.0);
        assert_eq!(report.entries[1].profit, 2.0);
        assert_eq!(report.recipes, 2);
        assert_eq!(store.load_profits().unwrap(), report.entries);
    }

    #[test]
    fn run_profits_reports_skips() {
        let store = store();
        let quotes: QuoteSnapshot = [(ProductId::new("SHARD_ZOMBIE"), quote(2.0, 100))]
            .into_iter()
            .collect();

        let report = run_profits(
            &store,
            &store,
            &quotes,
            ProfitOptions::default(),
            RankWeights::default(),
        )
        .unwrap();

        assert!(report.entries.is_empty());
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn find_uses_accepts_display_name_or_id() {
        let store = store();

        let by_name = find_uses(&store, "Zombie").unwrap().unwrap();
        let by_id = find_uses(&store, "SHARD_ZOMBIE").unwrap().unwrap();

        assert_eq!(by_name, by_id);
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name[1].output_item, "Wither");
        assert_eq!(by_name[1].ingredients, vec![("Zombie".to_string(), 2)]);
    }

    #[test]
    fn find_uses_unknown_shard_is_none() {
        assert!(find_uses(&store(), "Dragon").unwrap().is_none());
    }
}

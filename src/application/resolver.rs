//! Display-name to product-identifier resolution.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::domain::{FusionRecord, NameCorrections, ProcessedRecipe, ShardCatalog, ShardMetadata};

/// Apply name corrections to raw reference metadata and index the result.
pub fn build_catalog(
    reference: impl IntoIterator<Item = ShardMetadata>,
    corrections: &NameCorrections,
) -> ShardCatalog {
    ShardCatalog::new(reference.into_iter().map(|mut shard| {
        let corrected = corrections.apply(&shard.name);
        if corrected != shard.name {
            debug!(from = %shard.name, to = corrected, "Corrected shard name");
            shard.name = corrected.to_string();
        }
        shard
    }))
}

/// Outcome of resolving a batch of records.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// One recipe per input record, in input order.
    pub recipes: Vec<ProcessedRecipe>,
    /// Non-empty names absent from the catalog, passed through unchanged.
    pub unresolved: BTreeSet<String>,
}

/// Rewrites record names to canonical identifiers using a catalog.
pub struct IdentityResolver<'a> {
    catalog: &'a ShardCatalog,
}

impl<'a> IdentityResolver<'a> {
    #[must_use]
    pub fn new(catalog: &'a ShardCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve every ingredient and output name of every record.
    pub fn resolve(&self, records: &[FusionRecord]) -> Resolution {
        let mut unresolved = BTreeSet::new();

        let recipes = records
            .iter()
            .map(|record| ProcessedRecipe {
                quantity_1: record.quantity_1,
                ingredient_1: self.lookup(&record.ingredient_1, &mut unresolved),
                quantity_2: record.quantity_2,
                ingredient_2: self.lookup(&record.ingredient_2, &mut unresolved),
                output_quantity: record.output_quantity,
                output_item: self.lookup(&record.output_item, &mut unresolved),
            })
            .collect();

        for name in &unresolved {
            warn!(name = %name, "Shard name not found in metadata, passing through");
        }

        Resolution {
            recipes,
            unresolved,
        }
    }

    fn lookup(&self, name: &str, unresolved: &mut BTreeSet<String>) -> String {
        match self.catalog.product_id_for(name) {
            Some(product_id) => product_id.to_string(),
            None => {
                if !name.is_empty() {
                    unresolved.insert(name.to_string());
                }
                name.to_string()
            }
        }
    }
}

//! Shard reference metadata and the catalog built from it.
//!
//! The catalog is loaded once per run and never mutated afterwards. Display
//! names are unique: when the reference data (after name corrections) lists
//! the same name twice, the first entry wins.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::id::ProductId;
use super::rarity::Rarity;

/// Reference metadata for one shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardMetadata {
    /// Display name, unique within a catalog.
    pub name: String,
    /// Canonical bazaar identifier.
    pub product_id: ProductId,
    pub rarity: Rarity,
    /// Category tag such as `Reptile`.
    pub family: Option<String>,
    /// Short in-game crafting code.
    pub crafting_id: Option<String>,
}

/// Manual overrides for known misspellings in the reference metadata.
///
/// Keys are names as they appear upstream, values the corrected display name.
/// Supplied through configuration so the list stays auditable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameCorrections(BTreeMap<String, String>);

impl NameCorrections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the corrected spelling of `name`, or `name` itself.
    #[must_use]
    pub fn apply<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map_or(name, String::as_str)
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.0.insert(from.into(), to.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameCorrections {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Immutable set of shard metadata indexed by display name and product id.
#[derive(Debug, Clone, Default)]
pub struct ShardCatalog {
    shards: Vec<ShardMetadata>,
    by_name: HashMap<String, usize>,
    by_product: HashMap<ProductId, usize>,
}

impl ShardCatalog {
    /// Build a catalog, keeping the first shard seen for each display name.
    pub fn new(shards: impl IntoIterator<Item = ShardMetadata>) -> Self {
        let mut catalog = Self::default();
        for shard in shards {
            if catalog.by_name.contains_key(&shard.name) {
                warn!(name = %shard.name, product_id = %shard.product_id, "Duplicate shard name in metadata, keeping first");
                continue;
            }
            let idx = catalog.shards.len();
            catalog.by_name.insert(shard.name.clone(), idx);
            catalog
                .by_product
                .entry(shard.product_id.clone())
                .or_insert(idx);
            catalog.shards.push(shard);
        }
        catalog
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&ShardMetadata> {
        self.by_name.get(name).map(|&idx| &self.shards[idx])
    }

    #[must_use]
    pub fn by_product_id(&self, product_id: &str) -> Option<&ShardMetadata> {
        self.by_product.get(product_id).map(|&idx| &self.shards[idx])
    }

    /// Canonical identifier for a display name.
    #[must_use]
    pub fn product_id_for(&self, name: &str) -> Option<&ProductId> {
        self.by_name(name).map(|shard| &shard.product_id)
    }

    /// Display name for a canonical identifier.
    #[must_use]
    pub fn display_name(&self, product_id: &str) -> Option<&str> {
        self.by_product_id(product_id)
            .map(|shard| shard.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShardMetadata> {
        self.shards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shard(name: &str, id: &str, rarity: Rarity) -> ShardMetadata {
        ShardMetadata {
            name: name.to_string(),
            product_id: ProductId::new(id),
            rarity,
            family: None,
            crafting_id: None,
        }
    }

    #[test]
    fn corrections_rewrite_known_names_only() {
        let corrections: NameCorrections = [("Sea Serpant", "Sea Serpent")].into_iter().collect();
        assert_eq!(corrections.apply("Sea Serpant"), "Sea Serpent");
        assert_eq!(corrections.apply("Zombie"), "Zombie");
    }

    #[test]
    fn catalog_indexes_both_directions() {
        let catalog = ShardCatalog::new(vec![
            shard("Wither", "SHARD_WITHER", Rarity::Mythic),
            shard("Zombie", "SHARD_ZOMBIE", Rarity::Common),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.product_id_for("Wither").map(ProductId::as_str),
            Some("SHARD_WITHER")
        );
        assert_eq!(catalog.display_name("SHARD_ZOMBIE"), Some("Zombie"));
        assert!(catalog.by_name("Skeleton").is_none());
    }

    #[test]
    fn catalog_keeps_first_duplicate_name() {
        let catalog = ShardCatalog::new(vec![
            shard("Zombie", "SHARD_ZOMBIE", Rarity::Common),
            shard("Zombie", "SHARD_ZOMBIE_2", Rarity::Rare),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.by_name("Zombie").unwrap().rarity, Rarity::Common);
        assert!(catalog.by_product_id("SHARD_ZOMBIE_2").is_none());
    }
}

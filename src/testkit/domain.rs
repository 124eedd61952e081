//! Builders for domain primitives used across tests.

use std::collections::HashMap;

use chrono::Utc;

use crate::domain::{
    MarketQuote, ProcessedRecipe, ProductId, QuoteOrigin, QuoteSnapshot, Rarity, ShardCatalog,
    ShardMetadata,
};

/// Shard metadata with no family or crafting id.
pub fn shard(name: &str, product_id: &str, rarity: Rarity) -> ShardMetadata {
    ShardMetadata {
        name: name.to_string(),
        product_id: ProductId::new(product_id),
        rarity,
        family: None,
        crafting_id: None,
    }
}

/// Catalog from `(name, product_id, rarity)` triples.
pub fn catalog(shards: &[(&str, &str, Rarity)]) -> ShardCatalog {
    ShardCatalog::new(
        shards
            .iter()
            .map(|(name, id, rarity)| shard(name, id, *rarity)),
    )
}

/// Processed recipe from two `(item, quantity)` slots and an output.
pub fn recipe(
    slot_1: (&str, u32),
    slot_2: (&str, u32),
    output: (&str, u32),
) -> ProcessedRecipe {
    ProcessedRecipe {
        quantity_1: slot_1.1,
        ingredient_1: slot_1.0.to_string(),
        quantity_2: slot_2.1,
        ingredient_2: slot_2.0.to_string(),
        output_quantity: output.1,
        output_item: output.0.to_string(),
    }
}

/// Quote with a buy price, buy-order count and sell volume.
pub fn quote(buy_price: f64, buy_orders: u64, sell_volume: u64) -> MarketQuote {
    MarketQuote {
        buy_price: Some(buy_price),
        sell_price: Some(buy_price),
        buy_orders: Some(buy_orders),
        sell_volume,
        ..Default::default()
    }
}

/// Live snapshot captured now.
pub fn snapshot(quotes: Vec<(&str, MarketQuote)>) -> QuoteSnapshot {
    let quotes: HashMap<ProductId, MarketQuote> = quotes
        .into_iter()
        .map(|(id, quote)| (ProductId::new(id), quote))
        .collect();
    QuoteSnapshot::new(quotes, QuoteOrigin::Live, Utc::now())
}

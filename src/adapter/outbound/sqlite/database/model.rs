//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{
    bazaar_info, shard_profit_data, shard_recipes, shard_recipes_processed, shard_to_productid,
};

/// Database row for a shard lookup entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = shard_to_productid)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct ShardRow {
    pub name: String,
    pub product_id: String,
    pub rarity: String,
    pub family: Option<String>,
    pub crafting_id: Option<String>,
}

/// Database row for a raw (display-name) recipe.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = shard_recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeRow {
    pub recipe_id: i64,
    pub quantity_1: i64,
    pub ingredient_1: String,
    pub quantity_2: i64,
    pub ingredient_2: String,
    pub output_quantity: i64,
    pub output_item: String,
}

/// Database row for a resolved recipe.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = shard_recipes_processed)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProcessedRecipeRow {
    pub recipe_id: i64,
    pub quantity_1: i64,
    pub ingredient_1: String,
    pub quantity_2: i64,
    pub ingredient_2: String,
    pub output_quantity: i64,
    pub output_item: String,
}

/// Database row for a stored bazaar quote.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = bazaar_info)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct QuoteRow {
    pub product_id: String,
    pub sell_price: Option<f64>,
    pub sell_volume: i64,
    pub sell_moving_week: i64,
    pub sell_orders: i64,
    pub buy_price: Option<f64>,
    pub buy_volume: i64,
    pub buy_moving_week: i64,
    pub buy_orders: Option<i64>,
    pub captured_at: String,
}

/// Database row for a ranked profit entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = shard_profit_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfitRow {
    pub recipe_id: i64,
    pub rank_order: i64,
    pub output_item: String,
    pub demand: f64,
    pub profit: f64,
    /// JSON array of `{name, amount}` objects.
    pub ingredients: String,
}

//! Table definitions for the recipe store.
//!
//! Column names match the tables the stores create with raw DDL in
//! [`super::ddl`].

diesel::table! {
    shard_to_productid (name) {
        name -> Text,
        #[sql_name = "productID"]
        product_id -> Text,
        rarity -> Text,
        family -> Nullable<Text>,
        #[sql_name = "craftingID"]
        crafting_id -> Nullable<Text>,
    }
}

diesel::table! {
    shard_recipes (recipe_id) {
        recipe_id -> BigInt,
        quantity_1 -> BigInt,
        ingredient_1 -> Text,
        quantity_2 -> BigInt,
        ingredient_2 -> Text,
        output_quantity -> BigInt,
        output_item -> Text,
    }
}

diesel::table! {
    shard_recipes_processed (recipe_id) {
        recipe_id -> BigInt,
        quantity_1 -> BigInt,
        ingredient_1 -> Text,
        quantity_2 -> BigInt,
        ingredient_2 -> Text,
        output_quantity -> BigInt,
        output_item -> Text,
    }
}

diesel::table! {
    bazaar_info (product_id) {
        product_id -> Text,
        sell_price -> Nullable<Double>,
        sell_volume -> BigInt,
        sell_moving_week -> BigInt,
        sell_orders -> BigInt,
        buy_price -> Nullable<Double>,
        buy_volume -> BigInt,
        buy_moving_week -> BigInt,
        buy_orders -> Nullable<BigInt>,
        captured_at -> Text,
    }
}

diesel::table! {
    shard_profit_data (recipe_id) {
        recipe_id -> BigInt,
        rank_order -> BigInt,
        output_item -> Text,
        demand -> Double,
        profit -> Double,
        ingredients -> Text,
    }
}

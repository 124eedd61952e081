//! DDL for the tables the stores drop and recreate.

pub const CREATE_SHARD_TO_PRODUCTID: &str = "
    CREATE TABLE shard_to_productid
    (
        name       TEXT PRIMARY KEY NOT NULL,
        productID  TEXT NOT NULL,
        rarity     TEXT NOT NULL,
        family     TEXT,
        craftingID TEXT
    )";

pub const CREATE_SHARD_RECIPES: &str = "
    CREATE TABLE shard_recipes
    (
        recipe_id       INTEGER PRIMARY KEY NOT NULL,
        quantity_1      INTEGER NOT NULL,
        ingredient_1    TEXT NOT NULL,
        quantity_2      INTEGER NOT NULL,
        ingredient_2    TEXT NOT NULL,
        output_quantity INTEGER NOT NULL,
        output_item     TEXT NOT NULL
    )";

pub const CREATE_SHARD_RECIPES_PROCESSED: &str = "
    CREATE TABLE shard_recipes_processed
    (
        recipe_id       INTEGER PRIMARY KEY NOT NULL,
        quantity_1      INTEGER NOT NULL,
        ingredient_1    TEXT NOT NULL,
        quantity_2      INTEGER NOT NULL,
        ingredient_2    TEXT NOT NULL,
        output_quantity INTEGER NOT NULL,
        output_item     TEXT NOT NULL
    )";

pub const CREATE_BAZAAR_INFO: &str = "
    CREATE TABLE bazaar_info
    (
        product_id       TEXT PRIMARY KEY NOT NULL,
        sell_price       REAL,
        sell_volume      INTEGER NOT NULL,
        sell_moving_week INTEGER NOT NULL,
        sell_orders      INTEGER NOT NULL,
        buy_price        REAL,
        buy_volume       INTEGER NOT NULL,
        buy_moving_week  INTEGER NOT NULL,
        buy_orders       INTEGER,
        captured_at      TEXT NOT NULL
    )";

pub const CREATE_SHARD_PROFIT_DATA: &str = "
    CREATE TABLE shard_profit_data
    (
        recipe_id   INTEGER PRIMARY KEY NOT NULL,
        rank_order  INTEGER NOT NULL,
        output_item TEXT NOT NULL,
        demand      REAL NOT NULL,
        profit      REAL NOT NULL,
        ingredients TEXT NOT NULL
    )";

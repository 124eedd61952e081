//! SQLite recipe store implementation.
//!
//! Owns the `shard_to_productid`, `shard_recipes` and
//! `shard_recipes_processed` tables. A rebuild drops and recreates each one
//! inside a single transaction, so readers never observe a half-written table.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::adapter::outbound::sqlite::database::connection::{configure_sqlite_connection, DbPool};
use crate::adapter::outbound::sqlite::database::ddl;
use crate::adapter::outbound::sqlite::database::model::{ProcessedRecipeRow, RecipeRow, ShardRow};
use crate::adapter::outbound::sqlite::database::schema::{
    shard_recipes, shard_recipes_processed, shard_to_productid,
};
use crate::domain::{
    FusionRecord, ProcessedRecipe, ProductId, Rarity, ShardCatalog, ShardMetadata,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{RebuildSummary, RecipeStore};

/// Rows per INSERT statement, below SQLite's bound-parameter limit.
pub(super) const INSERT_CHUNK: usize = 500;

/// SQLite-backed store for recipes, quotes and profit results.
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(super) fn connection(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;
        Ok(conn)
    }
}

/// Drop `table`, recreate it and insert `rows`, all in one transaction.
pub(super) fn replace_table<R, F>(
    conn: &mut SqliteConnection,
    table: &str,
    create_sql: &str,
    rows: &[R],
    insert: F,
) -> Result<usize>
where
    F: Fn(&mut SqliteConnection, &[R]) -> QueryResult<usize>,
{
    let inserted = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
        diesel::sql_query(format!("DROP TABLE IF EXISTS {table}")).execute(conn)?;
        diesel::sql_query(create_sql).execute(conn)?;
        let mut inserted = 0;
        for chunk in rows.chunks(INSERT_CHUNK) {
            inserted += insert(conn, chunk)?;
        }
        Ok(inserted)
    })?;
    debug!(table, rows = inserted, "Replaced table");
    Ok(inserted)
}

fn from_column(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::Parse(format!("{field} {value} out of range in store")))
}

fn shard_row(shard: &ShardMetadata) -> ShardRow {
    ShardRow {
        name: shard.name.clone(),
        product_id: shard.product_id.to_string(),
        rarity: shard.rarity.to_string(),
        family: shard.family.clone(),
        crafting_id: shard.crafting_id.clone(),
    }
}

fn shard_from_row(row: ShardRow) -> Result<ShardMetadata> {
    Ok(ShardMetadata {
        rarity: row.rarity.parse::<Rarity>()?,
        name: row.name,
        product_id: ProductId::new(row.product_id),
        family: row.family,
        crafting_id: row.crafting_id,
    })
}

fn recipe_row(recipe_id: usize, record: &FusionRecord) -> RecipeRow {
    RecipeRow {
        recipe_id: recipe_id as i64,
        quantity_1: i64::from(record.quantity_1),
        ingredient_1: record.ingredient_1.clone(),
        quantity_2: i64::from(record.quantity_2),
        ingredient_2: record.ingredient_2.clone(),
        output_quantity: i64::from(record.output_quantity),
        output_item: record.output_item.clone(),
    }
}

fn processed_row(recipe_id: usize, recipe: &ProcessedRecipe) -> ProcessedRecipeRow {
    ProcessedRecipeRow {
        recipe_id: recipe_id as i64,
        quantity_1: i64::from(recipe.quantity_1),
        ingredient_1: recipe.ingredient_1.clone(),
        quantity_2: i64::from(recipe.quantity_2),
        ingredient_2: recipe.ingredient_2.clone(),
        output_quantity: i64::from(recipe.output_quantity),
        output_item: recipe.output_item.clone(),
    }
}

fn processed_from_row(row: ProcessedRecipeRow) -> Result<(usize, ProcessedRecipe)> {
    let recipe_id = usize::try_from(row.recipe_id)
        .map_err(|_| Error::Parse(format!("negative recipe_id {}", row.recipe_id)))?;
    Ok((
        recipe_id,
        ProcessedRecipe {
            quantity_1: from_column(row.quantity_1, "quantity_1")?,
            ingredient_1: row.ingredient_1,
            quantity_2: from_column(row.quantity_2, "quantity_2")?,
            ingredient_2: row.ingredient_2,
            output_quantity: from_column(row.output_quantity, "output_quantity")?,
            output_item: row.output_item,
        },
    ))
}

impl RecipeStore for SqliteStore {
    fn rebuild(
        &self,
        catalog: &ShardCatalog,
        raw: &[FusionRecord],
        processed: &[ProcessedRecipe],
    ) -> Result<RebuildSummary> {
        let shard_rows: Vec<ShardRow> = catalog.iter().map(shard_row).collect();
        let raw_rows = raw
            .iter()
            .enumerate()
            .map(|(idx, record)| recipe_row(idx, record))
            .collect::<Vec<_>>();
        let processed_rows = processed
            .iter()
            .enumerate()
            .map(|(idx, recipe)| processed_row(idx, recipe))
            .collect::<Vec<_>>();

        let mut conn = self.connection()?;

        let shards = replace_table(
            &mut conn,
            "shard_to_productid",
            ddl::CREATE_SHARD_TO_PRODUCTID,
            &shard_rows,
            |conn, chunk| {
                diesel::insert_into(shard_to_productid::table)
                    .values(chunk)
                    .execute(conn)
            },
        )?;
        let raw_recipes = replace_table(
            &mut conn,
            "shard_recipes",
            ddl::CREATE_SHARD_RECIPES,
            &raw_rows,
            |conn, chunk| {
                diesel::insert_into(shard_recipes::table)
                    .values(chunk)
                    .execute(conn)
            },
        )?;
        let processed_recipes = replace_table(
            &mut conn,
            "shard_recipes_processed",
            ddl::CREATE_SHARD_RECIPES_PROCESSED,
            &processed_rows,
            |conn, chunk| {
                diesel::insert_into(shard_recipes_processed::table)
                    .values(chunk)
                    .execute(conn)
            },
        )?;

        let summary = RebuildSummary {
            shards,
            raw_recipes,
            processed_recipes,
        };
        info!(shards, raw_recipes, processed_recipes, "Rebuilt recipe tables");
        Ok(summary)
    }

    fn load_catalog(&self) -> Result<ShardCatalog> {
        let mut conn = self.connection()?;
        let rows: Vec<ShardRow> = shard_to_productid::table
            .select(ShardRow::as_select())
            .load(&mut conn)?;

        let shards = rows
            .into_iter()
            .map(shard_from_row)
            .collect::<Result<Vec<_>>>()?;
        Ok(ShardCatalog::new(shards))
    }

    fn load_processed(&self) -> Result<Vec<ProcessedRecipe>> {
        let mut conn = self.connection()?;
        let rows: Vec<ProcessedRecipeRow> = shard_recipes_processed::table
            .order(shard_recipes_processed::recipe_id.asc())
            .select(ProcessedRecipeRow::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| processed_from_row(row).map(|(_, recipe)| recipe))
            .collect()
    }

    fn recipes_using(&self, product_id: &str) -> Result<Vec<(usize, ProcessedRecipe)>> {
        let mut conn = self.connection()?;
        let rows: Vec<ProcessedRecipeRow> = shard_recipes_processed::table
            .filter(
                shard_recipes_processed::ingredient_1
                    .eq(product_id)
                    .or(shard_recipes_processed::ingredient_2.eq(product_id)),
            )
            .order(shard_recipes_processed::recipe_id.asc())
            .select(ProcessedRecipeRow::as_select())
            .load(&mut conn)?;

        rows.into_iter().map(processed_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::create_pool;

    fn setup_test_db() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("recipes.db");
        let pool = create_pool(path.to_str().unwrap()).expect("Failed to create pool");
        (dir, SqliteStore::new(pool))
    }

    fn shard(name: &str, id: &str, rarity: Rarity) -> ShardMetadata {
        ShardMetadata {
            name: name.to_string(),
            product_id: ProductId::new(id),
            rarity,
            family: Some("Undead".to_string()),
            crafting_id: Some("C7".to_string()),
        }
    }

    fn record(i1: &str, i2: &str, out: &str) -> FusionRecord {
        FusionRecord {
            quantity_1: 2,
            ingredient_1: i1.to_string(),
            quantity_2: 1,
            ingredient_2: i2.to_string(),
            output_quantity: 1,
            output_item: out.to_string(),
        }
    }

    fn processed(i1: &str, i2: &str, out: &str) -> ProcessedRecipe {
        ProcessedRecipe {
            quantity_1: 2,
            ingredient_1: i1.to_string(),
            quantity_2: 1,
            ingredient_2: i2.to_string(),
            output_quantity: 1,
            output_item: out.to_string(),
        }
    }

    #[test]
    fn rebuild_roundtrips_catalog_and_recipes() {
        let (_dir, store) = setup_test_db();
        let catalog = ShardCatalog::new(vec![
            shard("Zombie", "SHARD_ZOMBIE", Rarity::Common),
            shard("Wither", "SHARD_WITHER", Rarity::Mythic),
        ]);
        let raw = vec![record("Zombie", "", "Wither"), record("Ghost", "Zombie", "Wither")];
        let resolved = vec![
            processed("SHARD_ZOMBIE", "", "SHARD_WITHER"),
            processed("Ghost", "SHARD_ZOMBIE", "SHARD_WITHER"),
        ];

        let summary = store.rebuild(&catalog, &raw, &resolved).unwrap();
        assert_eq!(
            summary,
            RebuildSummary {
                shards: 2,
                raw_recipes: 2,
                processed_recipes: 2
            }
        );

        let loaded = store.load_catalog().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.by_name("Wither").unwrap().rarity, Rarity::Mythic);
        assert_eq!(
            loaded.by_name("Zombie").unwrap().crafting_id.as_deref(),
            Some("C7")
        );

        assert_eq!(store.load_processed().unwrap(), resolved);
    }

    #[test]
    fn raw_table_keeps_display_names() {
        let (_dir, store) = setup_test_db();
        let raw = vec![record("Zombie", "Skeleton", "Wither")];
        store
            .rebuild(&ShardCatalog::default(), &raw, &[processed("A", "B", "C")])
            .unwrap();

        let mut conn = store.connection().unwrap();
        let rows: Vec<RecipeRow> = shard_recipes::table
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ingredient_2, "Skeleton");
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let (_dir, store) = setup_test_db();
        let first = vec![
            processed("SHARD_A", "SHARD_B", "SHARD_C"),
            processed("SHARD_D", "SHARD_E", "SHARD_F"),
        ];
        store
            .rebuild(
                &ShardCatalog::default(),
                &[record("A", "B", "C"), record("D", "E", "F")],
                &first,
            )
            .unwrap();

        let second = vec![processed("SHARD_X", "", "SHARD_Y")];
        store
            .rebuild(&ShardCatalog::default(), &[record("X", "", "Y")], &second)
            .unwrap();

        assert_eq!(store.load_processed().unwrap(), second);
    }

    #[test]
    fn rebuild_handles_more_rows_than_one_insert_chunk() {
        let (_dir, store) = setup_test_db();
        let raw: Vec<_> = (0..INSERT_CHUNK * 2 + 7)
            .map(|i| record("A", "B", &format!("OUT_{i}")))
            .collect();
        let resolved: Vec<_> = (0..raw.len())
            .map(|i| processed("SHARD_A", "SHARD_B", &format!("SHARD_OUT_{i}")))
            .collect();

        let summary = store
            .rebuild(&ShardCatalog::default(), &raw, &resolved)
            .unwrap();

        assert_eq!(summary.processed_recipes, raw.len());
        let loaded = store.load_processed().unwrap();
        assert_eq!(loaded[INSERT_CHUNK + 3].output_item, format!("SHARD_OUT_{}", INSERT_CHUNK + 3));
    }

    #[test]
    fn recipes_using_matches_either_slot() {
        let (_dir, store) = setup_test_db();
        let resolved = vec![
            processed("SHARD_ZOMBIE", "SHARD_GHOST", "SHARD_WITHER"),
            processed("SHARD_GHOST", "SHARD_BLAZE", "SHARD_TIDAL"),
            processed("SHARD_BLAZE", "SHARD_ZOMBIE", "SHARD_FIRE"),
        ];
        let raw: Vec<_> = (0..3).map(|_| record("a", "b", "c")).collect();
        store
            .rebuild(&ShardCatalog::default(), &raw, &resolved)
            .unwrap();

        let using: Vec<_> = store
            .recipes_using("SHARD_ZOMBIE")
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(using, vec![0, 2]);
    }

    #[test]
    fn largest_quantity_survives_the_store() {
        let (_dir, store) = setup_test_db();
        let mut recipe = processed("SHARD_ZOMBIE", "", "SHARD_WITHER");
        recipe.quantity_1 = u32::MAX;
        let mut raw = record("Zombie", "", "Wither");
        raw.quantity_1 = u32::MAX;

        store
            .rebuild(&ShardCatalog::default(), &[raw], &[recipe.clone()])
            .unwrap();

        assert_eq!(store.load_processed().unwrap(), vec![recipe]);
    }

    #[test]
    fn failed_chunk_leaves_previous_table_intact() {
        let (_dir, store) = setup_test_db();
        let catalog = ShardCatalog::new(vec![shard("Old", "SHARD_OLD", Rarity::Rare)]);
        store.rebuild(&catalog, &[], &[]).unwrap();

        let rows: Vec<ShardRow> = (0..=INSERT_CHUNK)
            .map(|i| {
                let id = format!("SHARD_NEW_{i}");
                shard_row(&shard(&format!("New {i}"), &id, Rarity::Common))
            })
            .collect();
        let calls = std::cell::Cell::new(0);
        let mut conn = store.connection().unwrap();
        let result = replace_table(
            &mut conn,
            "shard_to_productid",
            ddl::CREATE_SHARD_TO_PRODUCTID,
            &rows,
            |conn, chunk| {
                calls.set(calls.get() + 1);
                if calls.get() > 1 {
                    return Err(diesel::result::Error::RollbackTransaction);
                }
                diesel::insert_into(shard_to_productid::table)
                    .values(chunk)
                    .execute(conn)
            },
        );
        drop(conn);

        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(calls.get(), 2);
        let catalog = store.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.by_name("Old").is_some());
    }

    #[test]
    fn load_before_rebuild_is_a_database_error() {
        let (_dir, store) = setup_test_db();
        assert!(matches!(store.load_processed(), Err(Error::Database(_))));
    }
}

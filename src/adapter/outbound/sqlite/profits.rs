//! `shard_profit_data` persistence.

use diesel::prelude::*;
use tracing::info;

use super::database::ddl;
use super::database::model::ProfitRow;
use super::database::schema::shard_profit_data;
use super::store::{replace_table, SqliteStore};
use crate::domain::{IngredientLine, ProfitEntry};
use crate::error::{Error, Result};
use crate::port::outbound::store::ProfitStore;

fn profit_row(rank: usize, entry: &ProfitEntry) -> Result<ProfitRow> {
    Ok(ProfitRow {
        recipe_id: entry.recipe_id as i64,
        rank_order: rank as i64,
        output_item: entry.output_item.clone(),
        demand: entry.demand,
        profit: entry.profit,
        ingredients: serde_json::to_string(&entry.ingredients)?,
    })
}

fn entry_from_row(row: ProfitRow) -> Result<ProfitEntry> {
    let ingredients: Vec<IngredientLine> = serde_json::from_str(&row.ingredients)?;
    let recipe_id = usize::try_from(row.recipe_id)
        .map_err(|_| Error::Parse(format!("negative recipe_id {}", row.recipe_id)))?;
    Ok(ProfitEntry {
        recipe_id,
        output_item: row.output_item,
        profit: row.profit,
        demand: row.demand,
        ingredients,
    })
}

impl ProfitStore for SqliteStore {
    fn replace_profits(&self, entries: &[ProfitEntry]) -> Result<usize> {
        let rows = entries
            .iter()
            .enumerate()
            .map(|(rank, entry)| profit_row(rank, entry))
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.connection()?;
        let stored = replace_table(
            &mut conn,
            "shard_profit_data",
            ddl::CREATE_SHARD_PROFIT_DATA,
            &rows,
            |conn, chunk| {
                diesel::insert_into(shard_profit_data::table)
                    .values(chunk)
                    .execute(conn)
            },
        )?;
        info!(entries = stored, "Stored profit results");
        Ok(stored)
    }

    fn load_profits(&self) -> Result<Vec<ProfitEntry>> {
        let mut conn = self.connection()?;
        let rows: Vec<ProfitRow> = shard_profit_data::table
            .order(shard_profit_data::rank_order.asc())
            .select(ProfitRow::as_select())
            .load(&mut conn)?;

        rows.into_iter().map(entry_from_row).collect()
    }
}

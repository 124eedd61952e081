//! Ranked profit report (`shard_profits.json`).

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::{IngredientLine, ProfitEntry};
use crate::error::Result;

#[derive(Serialize)]
struct ReportEntry<'a> {
    rank: usize,
    recipe_id: usize,
    output_item: &'a str,
    profit: f64,
    demand: f64,
    ingredients: &'a [IngredientLine],
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render ranked entries as pretty JSON, profit rounded to two decimals.
pub fn render_report(entries: &[ProfitEntry]) -> Result<String> {
    let rows: Vec<ReportEntry<'_>> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| ReportEntry {
            rank: idx + 1,
            recipe_id: entry.recipe_id,
            output_item: &entry.output_item,
            profit: round_cents(entry.profit),
            demand: entry.demand,
            ingredients: &entry.ingredients,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Write the report to `path`, replacing any previous file.
pub fn write_report(path: impl AsRef<Path>, entries: &[ProfitEntry]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_report(entries)?)?;
    info!(path = %path.display(), entries = entries.len(), "Wrote profit report");
    Ok(())
}

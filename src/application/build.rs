//! Recipe store rebuild: parse, resolve, persist.
//!
//! Precondition: both sources have been read in full. The store is only
//! touched once parsing and resolution have succeeded, so a bad input file
//! never leaves the tables dropped.

use std::collections::BTreeSet;

use tracing::info;

use super::parser;
use super::resolver::{build_catalog, IdentityResolver};
use crate::domain::{FusionRow, NameCorrections, ShardMetadata};
use crate::error::Result;
use crate::port::outbound::store::{RebuildSummary, RecipeStore};

/// Outcome of a rebuild.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Rows read from the fusion table.
    pub table_rows: usize,
    pub summary: RebuildSummary,
    /// Names with no product identifier, stored as-is.
    pub unresolved: BTreeSet<String>,
}

/// Rebuild every recipe table from the raw fusion rows and reference metadata.
///
/// # Errors
/// Returns an error when the store cannot replace its tables.
pub fn rebuild_recipes(
    store: &dyn RecipeStore,
    rows: &[FusionRow],
    reference: Vec<ShardMetadata>,
    corrections: &NameCorrections,
) -> Result<BuildReport> {
    let records = parser::parse(rows);
    let catalog = build_catalog(reference, corrections);
    let resolution = IdentityResolver::new(&catalog).resolve(&records);

    let summary = store.rebuild(&catalog, &records, &resolution.recipes)?;
    info!(
        rows = rows.len(),
        recipes = summary.processed_recipes,
        unresolved = resolution.unresolved.len(),
        "Recipe store rebuilt"
    );

    Ok(BuildReport {
        table_rows: rows.len(),
        summary,
        unresolved: resolution.unresolved,
    })
}

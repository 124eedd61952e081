//! Handler for the `build` command.

use std::path::PathBuf;

use serde_json::json;

use super::command::BuildArgs;
use super::{context, output};
use crate::adapter::outbound::file::{read_fusion_table, read_metadata};
use crate::application::build::rebuild_recipes;
use crate::error::Result;

/// Names of unresolved items shown before eliding the rest.
const UNRESOLVED_SHOWN: usize = 10;

/// Execute `build`.
///
/// Both sources are read in full before any table is dropped.
pub fn execute(args: &BuildArgs) -> Result<()> {
    let config = context::load_config(args.store.config.as_deref())?;
    context::init_logging(&config);

    let metadata_path = args
        .metadata
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.sources.metadata_path));
    let table_path = args
        .fusion_table
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.sources.fusion_table_path));
    let skip_rows = args.skip_rows.unwrap_or(config.sources.header_skip_rows);

    output::header(env!("CARGO_PKG_VERSION"));
    let pb = output::spinner("Reading sources");
    let sources = read_metadata(&metadata_path)
        .and_then(|reference| Ok((reference, read_fusion_table(&table_path, skip_rows)?)));
    let (reference, rows) = match sources {
        Ok(sources) => {
            output::spinner_success(&pb, "Read sources");
            sources
        }
        Err(err) => {
            output::spinner_fail(&pb, "Failed to read sources");
            return Err(err);
        }
    };

    let store = context::open_store(&config, args.store.db.as_deref())?;
    let report = rebuild_recipes(&store, &rows, reference, &config.name_corrections)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "build",
            "table_rows": report.table_rows,
            "shards": report.summary.shards,
            "raw_recipes": report.summary.raw_recipes,
            "processed_recipes": report.summary.processed_recipes,
            "unresolved": report.unresolved,
        }));
        return Ok(());
    }

    output::section("Recipe store");
    output::field("Metadata", metadata_path.display());
    output::field("Fusions", table_path.display());
    output::field("Table rows", report.table_rows);
    output::field("Shards", report.summary.shards);
    output::field("Recipes", report.summary.processed_recipes);
    output::success("Rebuilt shard_to_productid, shard_recipes, shard_recipes_processed");

    if !report.unresolved.is_empty() {
        output::section("Unresolved names");
        output::warning(&format!(
            "{} names have no product id and were stored as-is",
            report.unresolved.len()
        ));
        for name in report.unresolved.iter().take(UNRESOLVED_SHOWN) {
            output::note(&format!("- {name}"));
        }
        if report.unresolved.len() > UNRESOLVED_SHOWN {
            output::note(&format!(
                "... and {} more",
                report.unresolved.len() - UNRESOLVED_SHOWN
            ));
        }
        output::hint("add a [name_corrections] entry when a metadata name is misspelled");
    }

    Ok(())
}

//! Handler for the `profits` command.

use std::path::PathBuf;

use chrono::Utc;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::ProfitsArgs;
use super::{context, output};
use crate::adapter::outbound::file::{write_report, SnapshotFile};
use crate::adapter::outbound::hypixel::HypixelClient;
use crate::application::market::{acquire_quotes, format_age};
use crate::application::pipeline::{run_profits, ProfitReport};
use crate::domain::{ProfitEntry, QuoteOrigin};
use crate::error::Result;
use crate::infrastructure::config::market::QuoteSourceKind;
use crate::port::outbound::quote::QuoteSource;
use crate::port::outbound::store::QuoteStore;

#[derive(Tabled)]
struct ProfitRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Output")]
    output: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Demand")]
    demand: String,
    #[tabled(rename = "Ingredients")]
    ingredients: String,
}

fn ingredient_summary(entry: &ProfitEntry) -> String {
    entry
        .ingredients
        .iter()
        .map(|line| format!("{}x {}", line.amount, line.name))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Execute `profits`.
pub async fn execute(args: &ProfitsArgs) -> Result<()> {
    let (config, store) = context::prepare(&args.store)?;
    let kind = args.source.map_or(config.market.source, Into::into);
    let fallback = (args.fallback_stored || config.market.fallback_to_stored)
        .then_some(&store as &dyn QuoteStore);

    output::header(env!("CARGO_PKG_VERSION"));

    let hypixel;
    let file;
    let source: &dyn QuoteSource = match kind {
        QuoteSourceKind::Live => {
            hypixel = HypixelClient::from_config(&config.market.hypixel);
            &hypixel
        }
        QuoteSourceKind::File => {
            file = SnapshotFile::new(&config.market.snapshot_path);
            &file
        }
        QuoteSourceKind::Stored => &store,
    };

    let pb = output::spinner(&format!("Loading quotes from {}", source.source_name()));
    let snapshot = match acquire_quotes(source, fallback).await {
        Ok(snapshot) => {
            output::spinner_success(&pb, &format!("Loaded {} quotes", snapshot.len()));
            snapshot
        }
        Err(err) => {
            output::spinner_fail(&pb, "No usable quotes");
            return Err(err);
        }
    };

    if kind == QuoteSourceKind::Live && snapshot.origin() == QuoteOrigin::Live {
        store.replace_quotes(&snapshot)?;
        if config.market.write_snapshot {
            SnapshotFile::new(&config.market.snapshot_path).write(&snapshot)?;
        }
    }

    let mut options = config.profit.options();
    if args.include_empty_orders {
        options.skip_empty_orders = false;
    }
    let report = run_profits(&store, &store, &snapshot, options, config.profit.weights())?;

    let report_path = args
        .report
        .clone()
        .or_else(|| config.profit.report_path.as_ref().map(PathBuf::from));
    if let Some(path) = &report_path {
        write_report(path, &report.entries)?;
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "profits",
            "origin": report.origin.to_string(),
            "captured_at": report.captured_at.to_rfc3339(),
            "recipes": report.recipes,
            "skipped": report.skipped.len(),
            "unresolved": report.unresolved,
            "entries": report.entries.iter().take(args.limit).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    print_report(&report, args.limit);
    if let Some(path) = report_path {
        output::field("Report", path.display());
    }
    Ok(())
}

fn print_report(report: &ProfitReport, limit: usize) {
    output::section("Quotes");
    output::field("Source", report.origin);
    let age = snapshot_age_of(report);
    output::field("Age", &age);
    if report.origin != QuoteOrigin::Live {
        output::note(&format!("prices are {age} old"));
    }

    output::section("Top fusions");
    if report.entries.is_empty() {
        output::warning("No recipe could be priced");
    } else {
        let rows: Vec<ProfitRow> = report
            .entries
            .iter()
            .take(limit)
            .enumerate()
            .map(|(idx, entry)| ProfitRow {
                rank: idx + 1,
                output: entry.output_item.clone(),
                profit: format!("{:.2}", entry.profit),
                demand: format!("{:.0}", entry.demand),
                ingredients: ingredient_summary(entry),
            })
            .collect();
        output::table(&Table::new(rows).to_string());
    }

    output::section("Summary");
    output::field("Recipes", report.recipes);
    output::field("Priced", report.entries.len());
    output::field("Skipped", report.skipped.len());
    if !report.unresolved.is_empty() {
        output::warning(&format!(
            "{} identifiers have no display name; run build to refresh the catalog",
            report.unresolved.len()
        ));
    }
}

fn snapshot_age_of(report: &ProfitReport) -> String {
    format_age(Utc::now().signed_duration_since(report.captured_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IngredientLine;

    #[test]
    fn ingredient_summary_joins_lines() {
        let entry = ProfitEntry {
            recipe_id: 0,
            output_item: "Wither".into(),
            profit: 46.0,
            demand: 7.0,
            ingredients: vec![
                IngredientLine {
                    name: "Zombie".into(),
                    amount: 2,
                },
                IngredientLine {
                    name: "Skeleton".into(),
                    amount: 1,
                },
            ],
        };
        assert_eq!(ingredient_summary(&entry), "2x Zombie + 1x Skeleton");
    }
}

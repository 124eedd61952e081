//! Handler for the `uses` command.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::UsesArgs;
use super::{context, output};
use crate::application::pipeline::find_uses;
use crate::domain::error::DomainError;
use crate::error::Result;

#[derive(Tabled)]
struct UseRow {
    #[tabled(rename = "Recipe")]
    recipe_id: usize,
    #[tabled(rename = "Ingredients")]
    ingredients: String,
    #[tabled(rename = "Output")]
    output: String,
}

/// Execute `uses <shard>`.
pub fn execute(args: &UsesArgs) -> Result<()> {
    let (_config, store) = context::prepare(&args.store)?;

    let Some(uses) = find_uses(&store, &args.shard)? else {
        return Err(DomainError::UnknownShard {
            name: args.shard.clone(),
        }
        .into());
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "uses",
            "shard": args.shard,
            "recipes": uses.iter().map(|u| json!({
                "recipe_id": u.recipe_id,
                "ingredients": u.ingredients.iter()
                    .map(|(name, amount)| json!({"name": name, "amount": amount}))
                    .collect::<Vec<_>>(),
                "output_item": u.output_item,
                "output_quantity": u.output_quantity,
            })).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    output::section(&format!("Recipes using {}", args.shard));
    if uses.is_empty() {
        output::note("(none)");
        return Ok(());
    }

    let rows: Vec<UseRow> = uses
        .iter()
        .map(|u| UseRow {
            recipe_id: u.recipe_id,
            ingredients: u
                .ingredients
                .iter()
                .map(|(name, amount)| format!("{amount}x {name}"))
                .collect::<Vec<_>>()
                .join(" + "),
            output: format!("{}x {}", u.output_quantity, u.output_item),
        })
        .collect();
    output::table(&Table::new(rows).to_string());
    output::field("Total", uses.len());
    Ok(())
}

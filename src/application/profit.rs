//! Profit computation over processed recipes and a quote snapshot.
//!
//! The engine is pure: the same recipes, quotes and options always produce
//! the same entries, in ascending recipe order. Recipes that cannot be priced
//! are skipped and reported, never zero-filled.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::domain::{
    IngredientLine, MarketQuote, PriceSide, ProcessedRecipe, ProfitEntry, QuoteSnapshot,
    ShardCatalog,
};

/// Revenue multiplier applied when an ingredient belongs to a shard family.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyBonus {
    pub family: String,
    pub multiplier: f64,
}

/// Knobs for a profit pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitOptions {
    /// Skip recipes whose ingredients have no buy orders.
    pub skip_empty_orders: bool,
    /// Quote side used to cost ingredients.
    pub ingredient_price: PriceSide,
    /// Quote side used to value the output.
    pub output_price: PriceSide,
    pub family_bonus: Option<FamilyBonus>,
}

impl Default for ProfitOptions {
    fn default() -> Self {
        Self {
            skip_empty_orders: true,
            ingredient_price: PriceSide::Buy,
            output_price: PriceSide::Buy,
            family_bonus: None,
        }
    }
}

/// Why a recipe produced no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The output item has no quote in the snapshot.
    MissingOutputQuote,
    /// An ingredient is quoted with zero buy orders.
    EmptyBuyOrders { item: String },
    /// A required price is absent, either because the item is unquoted or
    /// because its quote lacks the selected price.
    MissingPrice { item: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingOutputQuote => f.write_str("output not quoted"),
            SkipReason::EmptyBuyOrders { item } => write!(f, "no buy orders for {item}"),
            SkipReason::MissingPrice { item } => write!(f, "missing price for {item}"),
        }
    }
}

/// A recipe the engine could not price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecipe {
    pub recipe_id: usize,
    pub output_item: String,
    pub reason: SkipReason,
}

/// Result of one profit pass.
#[derive(Debug, Clone, Default)]
pub struct ProfitRun {
    /// Entries in ascending `recipe_id` order.
    pub entries: Vec<ProfitEntry>,
    pub skipped: Vec<SkippedRecipe>,
    /// Identifiers with no display name in the catalog.
    pub unresolved: BTreeSet<String>,
}

/// Joins recipes with quotes and applies the tiered profit formula.
pub struct ProfitEngine<'a> {
    catalog: &'a ShardCatalog,
    options: ProfitOptions,
}

struct Slot<'q> {
    item: &'q str,
    amount: u32,
    quote: Option<&'q MarketQuote>,
}

impl<'a> ProfitEngine<'a> {
    #[must_use]
    pub fn new(catalog: &'a ShardCatalog, options: ProfitOptions) -> Self {
        Self { catalog, options }
    }

    /// Price every recipe against `quotes`.
    pub fn compute(&self, recipes: &[ProcessedRecipe], quotes: &QuoteSnapshot) -> ProfitRun {
        let mut run = ProfitRun::default();

        for (recipe_id, recipe) in recipes.iter().enumerate() {
            match self.evaluate(recipe_id, recipe, quotes, &mut run.unresolved) {
                Ok(entry) => run.entries.push(entry),
                Err(reason) => {
                    debug!(recipe_id, output = %recipe.output_item, reason = %reason, "Skipping recipe");
                    run.skipped.push(SkippedRecipe {
                        recipe_id,
                        output_item: recipe.output_item.clone(),
                        reason,
                    });
                }
            }
        }

        for id in &run.unresolved {
            warn!(product_id = %id, "Item not found in product names mapping");
        }
        info!(
            priced = run.entries.len(),
            skipped = run.skipped.len(),
            origin = %quotes.origin(),
            "Computed recipe profits"
        );
        run
    }

    fn evaluate(
        &self,
        recipe_id: usize,
        recipe: &ProcessedRecipe,
        quotes: &QuoteSnapshot,
        unresolved: &mut BTreeSet<String>,
    ) -> Result<ProfitEntry, SkipReason> {
        let output = quotes
            .get(&recipe.output_item)
            .ok_or(SkipReason::MissingOutputQuote)?;

        // Empty slots are rows with a single input; they cost nothing.
        let slots: Vec<Slot<'_>> = recipe
            .ingredients()
            .into_iter()
            .filter(|(item, _)| !item.is_empty())
            .map(|(item, amount)| Slot {
                item,
                amount,
                quote: quotes.get(item),
            })
            .collect();

        if self.options.skip_empty_orders {
            if let Some(slot) = slots
                .iter()
                .find(|slot| slot.quote.is_some_and(|quote| quote.buy_orders == Some(0)))
            {
                return Err(SkipReason::EmptyBuyOrders {
                    item: slot.item.to_string(),
                });
            }
        }

        let mut cost = 0.0;
        for slot in &slots {
            let price = slot
                .quote
                .and_then(|quote| quote.price(self.options.ingredient_price))
                .ok_or_else(|| SkipReason::MissingPrice {
                    item: slot.item.to_string(),
                })?;
            cost += price * f64::from(slot.amount);
        }

        let output_price =
            output
                .price(self.options.output_price)
                .ok_or_else(|| SkipReason::MissingPrice {
                    item: recipe.output_item.clone(),
                })?;

        let single_unit = self
            .catalog
            .by_product_id(&recipe.output_item)
            .is_some_and(|shard| shard.rarity.yields_single_unit());
        let mut revenue = if single_unit {
            output_price
        } else {
            output_price * f64::from(recipe.output_quantity)
        };

        if let Some(bonus) = &self.options.family_bonus {
            if slots.iter().any(|slot| self.in_family(slot.item, &bonus.family)) {
                revenue *= bonus.multiplier;
            }
        }

        Ok(ProfitEntry {
            recipe_id,
            output_item: self.display_name(&recipe.output_item, unresolved),
            profit: revenue - cost,
            demand: output.sell_volume as f64,
            ingredients: slots
                .iter()
                .map(|slot| IngredientLine {
                    name: self.display_name(slot.item, unresolved),
                    amount: slot.amount,
                })
                .collect(),
        })
    }

    fn in_family(&self, product_id: &str, family: &str) -> bool {
        self.catalog
            .by_product_id(product_id)
            .and_then(|shard| shard.family.as_deref())
            .is_some_and(|f| f == family)
    }

    fn display_name(&self, product_id: &str, unresolved: &mut BTreeSet<String>) -> String {
        match self.catalog.display_name(product_id) {
            Some(name) => name.to_string(),
            None => {
                unresolved.insert(product_id.to_string());
                product_id.to_string()
            }
        }
    }
}

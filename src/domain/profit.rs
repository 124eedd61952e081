//! Profit results.

use serde::{Deserialize, Serialize};

/// One ingredient line of a profit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Display name where the catalog knows the item, else its identifier.
    pub name: String,
    pub amount: u32,
}

/// Expected profit of one viable recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitEntry {
    /// Position of the recipe in the processed-recipe sequence.
    pub recipe_id: usize,
    pub output_item: String,
    pub profit: f64,
    /// Sell volume of the output item.
    pub demand: f64,
    /// One line per occupied input slot: two lines, or one for a single-input
    /// fusion. Empty slots are not listed.
    pub ingredients: Vec<IngredientLine>,
}

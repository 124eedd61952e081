//! Fusion recipe types.
//!
//! A [`FusionRecord`] names its shards by display name exactly as the source
//! table spells them. A [`ProcessedRecipe`] has the same shape with names
//! rewritten to product identifiers wherever the catalog knows them.

use serde::{Deserialize, Serialize};

/// Input column headers of the raw fusion table.
pub const INPUT_COLUMNS: [&str; 2] = ["Input #1", "Input #2"];

/// Output column headers of the raw fusion table, in processing order.
pub const OUTPUT_COLUMNS: [&str; 3] = ["Output #1", "Output #2", "Output #3"];

/// One unparsed row of the fusion table.
///
/// Cells hold either nothing or text like `"x3 Harvester (rare)"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FusionRow {
    pub inputs: [String; 2],
    pub outputs: [String; 3],
}

impl FusionRow {
    pub fn new(inputs: [&str; 2], outputs: [&str; 3]) -> Self {
        Self {
            inputs: inputs.map(str::to_string),
            outputs: outputs.map(str::to_string),
        }
    }
}

/// A parsed fusion: two (possibly empty) inputs and one output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FusionRecord {
    pub quantity_1: u32,
    pub ingredient_1: String,
    pub quantity_2: u32,
    pub ingredient_2: String,
    pub output_quantity: u32,
    pub output_item: String,
}

/// Deduplication key for fusion records, independent of ingredient order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FusionKey {
    low: String,
    high: String,
    output: String,
}

impl FusionKey {
    pub fn new(ingredient_1: &str, ingredient_2: &str, output: &str) -> Self {
        let (low, high) = if ingredient_1 <= ingredient_2 {
            (ingredient_1, ingredient_2)
        } else {
            (ingredient_2, ingredient_1)
        };
        Self {
            low: low.to_string(),
            high: high.to_string(),
            output: output.to_string(),
        }
    }
}

/// A fusion record whose names have been resolved to product identifiers.
///
/// Names the catalog did not know are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessedRecipe {
    pub quantity_1: u32,
    pub ingredient_1: String,
    pub quantity_2: u32,
    pub ingredient_2: String,
    pub output_quantity: u32,
    pub output_item: String,
}

impl ProcessedRecipe {
    /// Ingredient slots in column order as `(item, quantity)`.
    #[must_use]
    pub fn ingredients(&self) -> [(&str, u32); 2] {
        [
            (self.ingredient_1.as_str(), self.quantity_1),
            (self.ingredient_2.as_str(), self.quantity_2),
        ]
    }

    #[must_use]
    pub fn uses_ingredient(&self, item: &str) -> bool {
        self.ingredient_1 == item || self.ingredient_2 == item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fusion_key_ignores_ingredient_order() {
        assert_eq!(
            FusionKey::new("Zombie", "Skeleton", "Wither"),
            FusionKey::new("Skeleton", "Zombie", "Wither")
        );
        assert_ne!(
            FusionKey::new("Zombie", "Skeleton", "Wither"),
            FusionKey::new("Zombie", "Skeleton", "Blaze")
        );
    }

    #[test]
    fn fusion_key_handles_empty_slot() {
        assert_eq!(
            FusionKey::new("", "Zombie", "Wither"),
            FusionKey::new("Zombie", "", "Wither")
        );
    }
}

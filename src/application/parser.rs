//! Fusion table parsing and deduplication.
//!
//! Cells are normalized leniently: a malformed quantity becomes `0` and a cell
//! without a name part becomes an empty name. Nothing in a row is fatal.
//!
//! Quantities are `u32`; a count above `u32::MAX` is treated as malformed.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::domain::{FusionKey, FusionRecord, FusionRow};

/// A cell split into quantity and cleaned name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub quantity: u32,
    pub name: String,
}

fn annotation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s*\(.*\)").expect("annotation pattern is valid"))
}

/// Split a cell like `"x3 Harvester (rare)"` into `(3, "Harvester")`.
#[must_use]
pub fn parse_cell(value: &str) -> Cell {
    if value.is_empty() {
        return Cell::default();
    }

    let (left, right) = match value.split_once(' ') {
        Some((left, right)) => (left, Some(right)),
        None => (value, None),
    };

    let digits = left.replace('x', "");
    let quantity = if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().unwrap_or_else(|_| {
            debug!(cell = value, "Quantity out of range, using 0");
            0
        })
    } else {
        debug!(cell = value, "Non-numeric quantity, using 0");
        0
    };

    let name = right
        .map(|right| annotation_pattern().replace_all(right, "").trim().to_string())
        .unwrap_or_default();

    Cell { quantity, name }
}

/// Parse fusion rows into records, first occurrence of each key winning.
///
/// Rows are processed top to bottom and outputs in column order. Every
/// non-empty output yields one record paired with the row's two inputs.
pub fn parse<'a>(rows: impl IntoIterator<Item = &'a FusionRow>) -> Vec<FusionRecord> {
    let mut seen: HashSet<FusionKey> = HashSet::new();
    let mut records = Vec::new();
    let mut duplicates = 0usize;

    for row in rows {
        let input_1 = parse_cell(&row.inputs[0]);
        let input_2 = parse_cell(&row.inputs[1]);

        for output in row.outputs.iter().map(|cell| parse_cell(cell)) {
            if output.name.is_empty() {
                continue;
            }

            let key = FusionKey::new(&input_1.name, &input_2.name, &output.name);
            if !seen.insert(key) {
                duplicates += 1;
                continue;
            }

            records.push(FusionRecord {
                quantity_1: input_1.quantity,
                ingredient_1: input_1.name.clone(),
                quantity_2: input_2.quantity,
                ingredient_2: input_2.name.clone(),
                output_quantity: output.quantity,
                output_item: output.name,
            });
        }
    }

    info!(records = records.len(), duplicates, "Parsed fusion table");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(quantity: u32, name: &str) -> Cell {
        Cell {
            quantity,
            name: name.to_string(),
        }
    }

    #[test]
    fn parse_cell_strips_prefix_and_annotation() {
        assert_eq!(parse_cell("x3 Harvester (rare)"), cell(3, "Harvester"));
        assert_eq!(parse_cell("x12 Sea Serpent"), cell(12, "Sea Serpent"));
        assert_eq!(parse_cell("2 Zombie Shard"), cell(2, "Zombie Shard"));
    }

    #[test]
    fn parse_cell_empty_and_nameless() {
        assert_eq!(parse_cell(""), Cell::default());
        assert_eq!(parse_cell("x3"), cell(3, ""));
        assert_eq!(parse_cell("Harvester"), cell(0, ""));
    }

    #[test]
    fn parse_cell_malformed_quantity_is_zero() {
        assert_eq!(parse_cell("x? Blaze"), cell(0, "Blaze"));
        assert_eq!(parse_cell("x Blaze"), cell(0, "Blaze"));
    }

    #[test]
    fn parse_cell_quantity_is_bounded_by_u32() {
        assert_eq!(parse_cell("x4294967295 Blaze"), cell(u32::MAX, "Blaze"));
        assert_eq!(parse_cell("x4294967296 Blaze"), cell(0, "Blaze"));
    }

    #[test]
    fn parse_cell_annotation_spans_to_last_paren() {
        assert_eq!(parse_cell("x1 Tidal (a) Foo (b)"), cell(1, "Tidal"));
        assert_eq!(parse_cell("x1 Tidal (unclosed"), cell(1, "Tidal (unclosed"));
    }

    #[test]
    fn parse_fans_out_outputs_in_column_order() {
        let rows = vec![FusionRow::new(
            ["x2 Zombie", "x1 Skeleton"],
            ["x1 Wither", "", "x3 Blaze (chance)"],
        )];

        let records = parse(&rows);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].output_item, "Wither");
        assert_eq!(records[1].output_item, "Blaze");
        assert_eq!(records[1].output_quantity, 3);
        assert_eq!(records[1].ingredient_1, "Zombie");
        assert_eq!(records[1].quantity_2, 1);
    }

    #[test]
    fn parse_dedups_unordered_pair_first_writer_wins() {
        let rows = vec![
            FusionRow::new(["x2 Zombie", "x1 Skeleton"], ["x1 Wither", "", ""]),
            FusionRow::new(["x5 Skeleton", "x5 Zombie"], ["x9 Wither", "", ""]),
            FusionRow::new(["x2 Zombie", "x1 Skeleton"], ["x1 Blaze", "", ""]),
        ];

        let records = parse(&rows);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].quantity_1, 2);
        assert_eq!(records[0].ingredient_1, "Zombie");
        assert_eq!(records[0].output_quantity, 1);
        assert_eq!(records[1].output_item, "Blaze");
    }

    #[test]
    fn parse_dedups_within_a_row() {
        let rows = vec![FusionRow::new(
            ["x2 Zombie", ""],
            ["x1 Wither", "x4 Wither (again)", ""],
        )];

        let records = parse(&rows);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].output_quantity, 1);
    }

    #[test]
    fn parse_skips_rows_without_outputs() {
        let rows = vec![FusionRow::new(["x2 Zombie", "x1 Skeleton"], ["", "x4", ""])];
        assert!(parse(&rows).is_empty());
    }

    #[test]
    fn parse_is_idempotent() {
        let rows = vec![
            FusionRow::new(["x2 Zombie", "x1 Skeleton"], ["x1 Wither", "x2 Blaze", ""]),
            FusionRow::new(["x1 Skeleton", "x2 Zombie"], ["x1 Wither", "", ""]),
            FusionRow::new(["x? Tidal", ""], ["x1 Sea Serpent (rare)", "", ""]),
        ];

        assert_eq!(parse(&rows), parse(&rows));
    }
}

//! Source files for the Wither fusion scenario.
//!
//! Two Zombie shards (2.0 each) fuse into one Mythic Wither shard quoted at
//! 50.0 with a sell volume of 7, for an expected profit of 46.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::QuoteSnapshot;

use super::domain::{quote, snapshot};

/// Fusion list export with one title row.
pub const FUSION_TABLE: &str = "\
Full Fusion List - Hypixel SkyBlock,,,,
Input #1,Input #2,Output #1,Output #2,Output #3
x2 Zombie,,x1 Wither (mythic),,
x2 Zombie,,x1 Wither,,
x3 Tide (rare),x1 Sea Serpent,x2 Coral,,
";

/// Shard metadata, including a misspelled name that needs correcting.
pub const METADATA: &str = r#"{"shards": {
    "Zombie": {"productID": "SHARD_ZOMBIE", "rarity": "Common", "family": ["Undead"], "id": "C7"},
    "Wither": {"productID": "SHARD_WITHER", "rarity": "Mythic", "family": ["Undead"], "id": "M1"},
    "Tide": {"productID": "SHARD_TIDE", "rarity": "Rare", "id": "R4"},
    "Sea Serpant": {"productID": "SHARD_SEA_SERPENT", "rarity": "Epic", "id": "E2"}
}}"#;

/// Fusion list naming shards the way the in-game export does.
pub const SHARD_NAMED_FUSION_TABLE: &str = "\
Full Fusion List - Hypixel SkyBlock,,,,
Input #1,Input #2,Output #1,Output #2,Output #3
x2 Zombie Shard,,x1 Wither Shard,,
";

/// Metadata matching [`SHARD_NAMED_FUSION_TABLE`].
pub const SHARD_NAMED_METADATA: &str = r#"{"shards": {
    "Zombie Shard": {"productID": "SHARD_ZOMBIE", "rarity": "Common", "family": ["Undead"], "id": "C7"},
    "Wither Shard": {"productID": "SHARD_WITHER", "rarity": "Mythic", "family": ["Undead"], "id": "M1"}
}}"#;

/// Bazaar snapshot JSON matching [`wither_snapshot`].
pub const BAZAAR_SNAPSHOT: &str = r#"{
    "SHARD_ZOMBIE": {"buyPrice": 2.0, "sellPrice": 1.8, "buyOrders": 12, "sellVolume": 300},
    "SHARD_WITHER": {"buyPrice": 50.0, "sellPrice": 47.5, "buyOrders": 3, "sellVolume": 7}
}"#;

/// Paths of scenario files written into a directory.
#[derive(Debug, Clone)]
pub struct ScenarioFiles {
    pub metadata: PathBuf,
    pub fusion_table: PathBuf,
    pub snapshot: PathBuf,
}

/// Write the scenario files into `dir`.
pub fn write_scenario(dir: &Path) -> std::io::Result<ScenarioFiles> {
    let files = ScenarioFiles {
        metadata: dir.join("shards_cleaned.json"),
        fusion_table: dir.join("fusions.csv"),
        snapshot: dir.join("bazaar.json"),
    };
    fs::write(&files.metadata, METADATA)?;
    fs::write(&files.fusion_table, FUSION_TABLE)?;
    fs::write(&files.snapshot, BAZAAR_SNAPSHOT)?;
    Ok(files)
}

/// Write the `... Shard` named variant of the scenario into `dir`.
pub fn write_shard_named_scenario(dir: &Path) -> std::io::Result<ScenarioFiles> {
    let files = ScenarioFiles {
        metadata: dir.join("shards_named.json"),
        fusion_table: dir.join("fusions_named.csv"),
        snapshot: dir.join("bazaar.json"),
    };
    fs::write(&files.metadata, SHARD_NAMED_METADATA)?;
    fs::write(&files.fusion_table, SHARD_NAMED_FUSION_TABLE)?;
    fs::write(&files.snapshot, BAZAAR_SNAPSHOT)?;
    Ok(files)
}

/// Quotes for the Zombie → Wither recipe.
pub fn wither_snapshot() -> QuoteSnapshot {
    snapshot(vec![
        ("SHARD_ZOMBIE", quote(2.0, 12, 300)),
        ("SHARD_WITHER", quote(50.0, 3, 7)),
    ])
}

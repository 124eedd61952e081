//! Loader for the cleaned shard metadata (`shards_cleaned.json`).
//!
//! ```json
//! {"shards": {"Zombie": {"productID": "SHARD_ZOMBIE", "rarity": "Common",
//!             "family": ["Undead"], "id": "C7"}}}
//! ```
//!
//! The object key is the display name. `family` is either a list (the first
//! entry is used) or a single string.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{ProductId, Rarity, ShardMetadata};
use crate::error::{Result, SourceError};

#[derive(Debug, Deserialize)]
struct MetadataFile {
    shards: BTreeMap<String, ShardEntry>,
}

#[derive(Debug, Deserialize)]
struct ShardEntry {
    #[serde(rename = "productID", default)]
    product_id: Option<String>,
    rarity: Rarity,
    #[serde(default)]
    family: Option<Family>,
    #[serde(default)]
    id: Option<CraftingId>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Family {
    List(Vec<String>),
    Single(String),
}

impl Family {
    fn primary(self) -> Option<String> {
        let name = match self {
            Family::List(list) => list.into_iter().next(),
            Family::Single(name) => Some(name),
        };
        name.filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CraftingId {
    Text(String),
    Number(i64),
}

impl From<CraftingId> for String {
    fn from(id: CraftingId) -> Self {
        match id {
            CraftingId::Text(text) => text,
            CraftingId::Number(n) => n.to_string(),
        }
    }
}

/// Read shard metadata from `path`.
///
/// # Errors
/// Fails when the file cannot be read or a shard carries an unknown rarity.
pub fn read_metadata(path: impl AsRef<Path>) -> Result<Vec<ShardMetadata>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SourceError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let shards = parse_metadata(&content)?;
    info!(path = %path.display(), shards = shards.len(), "Read shard metadata");
    Ok(shards)
}

/// Parse shard metadata JSON. Entries without a `productID` are skipped.
pub fn parse_metadata(content: &str) -> Result<Vec<ShardMetadata>> {
    let file: MetadataFile = serde_json::from_str(content)?;

    let mut shards = Vec::with_capacity(file.shards.len());
    for (name, entry) in file.shards {
        let Some(product_id) = entry.product_id.filter(|id| !id.is_empty()) else {
            warn!(shard = %name, "Shard has no productID, skipping");
            continue;
        };
        shards.push(ShardMetadata {
            name,
            product_id: ProductId::new(product_id),
            rarity: entry.rarity,
            family: entry.family.and_then(Family::primary),
            crafting_id: entry.id.map(String::from),
        });
    }
    Ok(shards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn parses_list_and_string_families() {
        let json = r#"{"shards": {
            "Zombie": {"productID": "SHARD_ZOMBIE", "rarity": "Common", "family": ["Undead", "Ghoul"], "id": "C7"},
            "Wither": {"productID": "SHARD_WITHER", "rarity": "mythic", "family": "Wither", "id": 12}
        }}"#;

        let shards = parse_metadata(json).unwrap();
        let zombie = shards.iter().find(|s| s.name == "Zombie").unwrap();
        let wither = shards.iter().find(|s| s.name == "Wither").unwrap();

        assert_eq!(zombie.family.as_deref(), Some("Undead"));
        assert_eq!(zombie.crafting_id.as_deref(), Some("C7"));
        assert_eq!(wither.rarity, Rarity::Mythic);
        assert_eq!(wither.family.as_deref(), Some("Wither"));
        assert_eq!(wither.crafting_id.as_deref(), Some("12"));
    }

    #[test]
    fn empty_family_list_is_none() {
        let json = r#"{"shards": {"Tide": {"productID": "SHARD_TIDE", "rarity": "Rare", "family": []}}}"#;
        let shards = parse_metadata(json).unwrap();
        assert_eq!(shards[0].family, None);
        assert_eq!(shards[0].crafting_id, None);
    }

    #[test]
    fn shard_without_product_id_is_skipped() {
        let json = r#"{"shards": {
            "Ghost": {"rarity": "Epic"},
            "Zombie": {"productID": "SHARD_ZOMBIE", "rarity": "Common"}
        }}"#;
        let shards = parse_metadata(json).unwrap();
        assert_eq!(shards.len(), 1);
        assert_eq!(shards[0].name, "Zombie");
    }

    #[test]
    fn unknown_rarity_is_fatal() {
        let json = r#"{"shards": {"Zombie": {"productID": "SHARD_ZOMBIE", "rarity": "Ultra"}}}"#;
        assert!(matches!(parse_metadata(json), Err(Error::Json(_))));
    }
}

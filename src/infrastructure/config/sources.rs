//! Input file locations for `build`.

use serde::Deserialize;

/// Reference metadata and raw fusion table paths.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Cleaned shard metadata JSON.
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,
    /// Fusion list CSV export.
    #[serde(default = "default_fusion_table_path")]
    pub fusion_table_path: String,
    /// Title rows preceding the CSV header.
    #[serde(default = "default_header_skip_rows")]
    pub header_skip_rows: usize,
}

fn default_metadata_path() -> String {
    "shards_cleaned.json".into()
}

fn default_fusion_table_path() -> String {
    "Full Fusion List - Hypixel SkyBlock - List.csv".into()
}

const fn default_header_skip_rows() -> usize {
    1
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            metadata_path: default_metadata_path(),
            fusion_table_path: default_fusion_table_path(),
            header_skip_rows: default_header_skip_rows(),
        }
    }
}

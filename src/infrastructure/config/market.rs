//! Market quote acquisition settings.

use std::fmt;

use serde::Deserialize;

use crate::adapter::outbound::hypixel::HypixelConfig;

/// Where `profits` reads quotes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSourceKind {
    /// Fetch from the bazaar API.
    #[default]
    Live,
    /// Read the JSON snapshot file.
    File,
    /// Read the `bazaar_info` table written by the last fetch.
    Stored,
}

impl fmt::Display for QuoteSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteSourceKind::Live => f.write_str("live"),
            QuoteSourceKind::File => f.write_str("file"),
            QuoteSourceKind::Stored => f.write_str("stored"),
        }
    }
}

/// `[market]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub source: QuoteSourceKind,
    /// JSON snapshot location, read by the `file` source and written by fetches.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Write the snapshot file after every live fetch.
    #[serde(default = "default_true")]
    pub write_snapshot: bool,
    /// Fall back to the stored snapshot when a live fetch fails.
    #[serde(default)]
    pub fallback_to_stored: bool,
    #[serde(flatten)]
    pub hypixel: HypixelConfig,
}

fn default_snapshot_path() -> String {
    "bazaar.json".into()
}

const fn default_true() -> bool {
    true
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            source: QuoteSourceKind::default(),
            snapshot_path: default_snapshot_path(),
            write_snapshot: true,
            fallback_to_stored: false,
            hypixel: HypixelConfig::default(),
        }
    }
}

//! JSON bazaar snapshot (`bazaar.json`): product id → quick status.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{MarketQuote, ProductId, QuoteOrigin, QuoteSnapshot};
use crate::error::{Result, SourceError};
use crate::port::outbound::quote::QuoteSource;

/// A snapshot file on disk, readable as a quote source.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. Its capture time is the file's modification time.
    ///
    /// # Errors
    /// Fails when the file cannot be read or is not a product → quote object.
    pub fn read(&self) -> Result<QuoteSnapshot> {
        let content = fs::read_to_string(&self.path).map_err(|source| SourceError::ReadFile {
            path: self.path.display().to_string(),
            source,
        })?;
        let quotes: HashMap<ProductId, MarketQuote> = serde_json::from_str(&content)?;

        let captured_at = fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        info!(path = %self.path.display(), quotes = quotes.len(), "Read bazaar snapshot");
        Ok(QuoteSnapshot::new(quotes, QuoteOrigin::File, captured_at))
    }

    /// Write `snapshot` as pretty JSON, keys sorted, replacing any previous file.
    pub fn write(&self, snapshot: &QuoteSnapshot) -> Result<()> {
        let ordered: BTreeMap<&str, &MarketQuote> =
            snapshot.iter().map(|(id, quote)| (id.as_str(), quote)).collect();
        let json = serde_json::to_string_pretty(&ordered)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), quotes = ordered.len(), "Wrote bazaar snapshot");
        Ok(())
    }
}

#[async_trait]
impl QuoteSource for SnapshotFile {
    async fn fetch_quotes(&self) -> Result<QuoteSnapshot> {
        self.read()
    }

    fn source_name(&self) -> &'static str {
        "snapshot file"
    }
}

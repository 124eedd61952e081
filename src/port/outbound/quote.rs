//! Market quote supplier port.

use async_trait::async_trait;

use crate::domain::QuoteSnapshot;
use crate::error::Result;

/// Supplies a complete quote snapshot keyed by product identifier.
///
/// Implementations return an error rather than an empty snapshot when the
/// transport fails, so callers can tell "no data" from "no quotes".
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Capture the current quotes.
    async fn fetch_quotes(&self) -> Result<QuoteSnapshot>;

    /// Human-readable name for logs and diagnostics.
    fn source_name(&self) -> &'static str;
}

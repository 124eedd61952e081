//! Quote acquisition with an opt-in stored fallback.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::domain::QuoteSnapshot;
use crate::error::{Error, Result};
use crate::port::outbound::quote::QuoteSource;
use crate::port::outbound::store::QuoteStore;

/// Capture one snapshot from `source`.
///
/// An empty snapshot counts as a failure. When `fallback` is given, a failure
/// is logged and the stored snapshot is used instead, with a warning naming
/// its age.
///
/// # Errors
/// Returns the source error (or [`Error::QuoteUnavailable`]) when no usable
/// snapshot can be obtained.
pub async fn acquire_quotes(
    source: &dyn QuoteSource,
    fallback: Option<&dyn QuoteStore>,
) -> Result<QuoteSnapshot> {
    let failure = match source.fetch_quotes().await {
        Ok(snapshot) if !snapshot.is_empty() => {
            info!(
                source = source.source_name(),
                quotes = snapshot.len(),
                "Captured quote snapshot"
            );
            return Ok(snapshot);
        }
        Ok(_) => Error::QuoteUnavailable(format!("{} returned no quotes", source.source_name())),
        Err(err) => err,
    };

    let Some(store) = fallback else {
        return Err(failure);
    };

    warn!(
        source = source.source_name(),
        error = %failure,
        "Quote fetch failed, falling back to stored snapshot"
    );
    let stored = store.load_quotes()?;
    if stored.is_empty() {
        return Err(Error::QuoteUnavailable(format!(
            "{failure}; stored snapshot is empty"
        )));
    }

    let age = snapshot_age(&stored, Utc::now());
    warn!(
        captured_at = %stored.captured_at(),
        age = %format_age(age),
        "Using stored bazaar snapshot"
    );
    Ok(stored)
}

/// Time elapsed between capture and `now`.
#[must_use]
pub fn snapshot_age(snapshot: &QuoteSnapshot, now: DateTime<Utc>) -> Duration {
    now.signed_duration_since(snapshot.captured_at())
}

/// Compact age such as `2d 3h`, `45m` or `12s`.
#[must_use]
pub fn format_age(age: Duration) -> String {
    let secs = age.num_seconds().max(0);
    let (days, hours, minutes) = (secs / 86_400, (secs % 86_400) / 3600, (secs % 3600) / 60);
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{secs}s")
    }
}

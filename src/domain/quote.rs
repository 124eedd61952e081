//! Market quotes and the snapshot the profit engine reads.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::ProductId;

/// Bazaar quick-status for one product.
///
/// Prices may be missing upstream; counts default to zero when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
    #[serde(default)]
    pub buy_price: Option<f64>,
    #[serde(default)]
    pub sell_price: Option<f64>,
    /// Absent when the bazaar omits the field; not the same as zero.
    #[serde(default)]
    pub buy_orders: Option<u64>,
    #[serde(default)]
    pub sell_orders: u64,
    #[serde(default)]
    pub buy_volume: u64,
    #[serde(default)]
    pub sell_volume: u64,
    #[serde(default)]
    pub buy_moving_week: u64,
    #[serde(default)]
    pub sell_moving_week: u64,
}

impl MarketQuote {
    /// Price on the requested side of the book, if quoted.
    #[must_use]
    pub fn price(&self, side: PriceSide) -> Option<f64> {
        match side {
            PriceSide::Buy => self.buy_price,
            PriceSide::Sell => self.sell_price,
        }
    }
}

/// Which quoted price a computation reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSide {
    #[default]
    Buy,
    Sell,
}

impl fmt::Display for PriceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSide::Buy => f.write_str("buy"),
            PriceSide::Sell => f.write_str("sell"),
        }
    }
}

impl FromStr for PriceSide {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(PriceSide::Buy),
            "sell" => Ok(PriceSide::Sell),
            _ => Err(DomainError::UnknownPriceSide {
                value: s.to_string(),
            }),
        }
    }
}

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteOrigin {
    /// Fetched from the bazaar API during this run.
    Live,
    /// Read from a JSON snapshot file.
    File,
    /// Read back from the `bazaar_info` table.
    Stored,
}

impl fmt::Display for QuoteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteOrigin::Live => f.write_str("live"),
            QuoteOrigin::File => f.write_str("file"),
            QuoteOrigin::Stored => f.write_str("stored"),
        }
    }
}

/// Immutable mapping from product identifier to quote for one profit pass.
#[derive(Debug, Clone)]
pub struct QuoteSnapshot {
    quotes: HashMap<ProductId, MarketQuote>,
    origin: QuoteOrigin,
    captured_at: DateTime<Utc>,
}

impl QuoteSnapshot {
    pub fn new(
        quotes: HashMap<ProductId, MarketQuote>,
        origin: QuoteOrigin,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            quotes,
            origin,
            captured_at,
        }
    }

    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&MarketQuote> {
        self.quotes.get(product_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &MarketQuote)> {
        self.quotes.iter()
    }

    #[must_use]
    pub fn origin(&self) -> QuoteOrigin {
        self.origin
    }

    #[must_use]
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl FromIterator<(ProductId, MarketQuote)> for QuoteSnapshot {
    fn from_iter<T: IntoIterator<Item = (ProductId, MarketQuote)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect(), QuoteOrigin::Live, Utc::now())
    }
}

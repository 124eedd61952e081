//! Hypixel bazaar REST client.
//!
//! Fetches `GET /v2/skyblock/bazaar` and reduces it to the per-product quick
//! status. Timeouts and connect errors are retried with a fixed backoff;
//! HTTP error statuses and `success: false` payloads are not.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client as HttpClient;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::dto::BazaarResponse;
use super::settings::HypixelConfig;
use crate::domain::{MarketQuote, ProductId, QuoteOrigin, QuoteSnapshot};
use crate::error::{Error, Result};
use crate::port::outbound::quote::QuoteSource;

/// Header carrying the Hypixel API key.
const API_KEY_HEADER: &str = "API-Key";

/// HTTP client for the Hypixel bazaar endpoint.
pub struct HypixelClient {
    http: HttpClient,
    api_url: String,
    api_key: Option<String>,
    aliases: BTreeMap<String, String>,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl HypixelClient {
    /// Create a client for `api_url` with no key, no aliases and no retries.
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            http: HttpClient::new(),
            api_url,
            api_key: None,
            aliases: BTreeMap::new(),
            retry_max_attempts: 1,
            retry_backoff_ms: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &HypixelConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            aliases: config.aliases.clone(),
            retry_max_attempts: config.http.retry_max_attempts,
            retry_backoff_ms: config.http.retry_backoff_ms,
        }
    }

    async fn get_with_retry<T>(&self, url: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let mut request = self.http.get(url);
            if let Some(key) = &self.api_key {
                request = request.header(API_KEY_HEADER, key);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let response = response.error_for_status()?;

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "Bazaar request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    /// Fetch the raw bazaar payload.
    pub async fn get_bazaar(&self) -> Result<BazaarResponse> {
        info!(url = %self.api_url, authenticated = self.api_key.is_some(), "Fetching bazaar");
        let response: BazaarResponse = self.get_with_retry(&self.api_url).await?;
        debug!(products = response.products.len(), "Fetched bazaar products");
        Ok(response)
    }

    /// Reduce a bazaar payload to a quote snapshot, applying aliases.
    ///
    /// # Errors
    /// Returns [`Error::QuoteUnavailable`] when the payload reports failure.
    pub fn snapshot_from(&self, response: BazaarResponse) -> Result<QuoteSnapshot> {
        if !response.success {
            let cause = response
                .cause
                .unwrap_or_else(|| "bazaar reported success=false".to_string());
            return Err(Error::QuoteUnavailable(cause));
        }

        let captured_at = response
            .last_updated
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .unwrap_or_else(Utc::now);

        let mut quotes: HashMap<ProductId, MarketQuote> = response
            .products
            .into_iter()
            .map(|(id, product)| (ProductId::new(id), product.quick_status))
            .collect();
        apply_aliases(&mut quotes, &self.aliases);

        Ok(QuoteSnapshot::new(quotes, QuoteOrigin::Live, captured_at))
    }
}

/// Copy each alias source's quote onto its target. Missing sources are ignored.
pub fn apply_aliases(
    quotes: &mut HashMap<ProductId, MarketQuote>,
    aliases: &BTreeMap<String, String>,
) {
    for (target, source) in aliases {
        match quotes.get(source.as_str()).cloned() {
            Some(quote) => {
                debug!(%target, %source, "Aliasing bazaar quote");
                quotes.insert(ProductId::new(target.as_str()), quote);
            }
            None => debug!(%target, %source, "Alias source not listed, skipping"),
        }
    }
}

#[async_trait]
impl QuoteSource for HypixelClient {
    async fn fetch_quotes(&self) -> Result<QuoteSnapshot> {
        let response = self.get_bazaar().await?;
        self.snapshot_from(response)
    }

    fn source_name(&self) -> &'static str {
        "Hypixel bazaar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::hypixel::dto::BazaarProduct;
    use crate::adapter::outbound::hypixel::settings::HypixelHttpConfig;

    fn quote(buy: f64) -> MarketQuote {
        MarketQuote {
            buy_price: Some(buy),
            buy_orders: Some(1),
            ..Default::default()
        }
    }

    fn response(products: &[(&str, f64)]) -> BazaarResponse {
        BazaarResponse {
            success: true,
            cause: None,
            last_updated: Some(1_760_000_000_000),
            products: products
                .iter()
                .map(|(id, buy)| {
                    (
                        (*id).to_string(),
                        BazaarProduct {
                            quick_status: quote(*buy),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn client_from_config_uses_config_values() {
        let config = HypixelConfig {
            api_url: "https://bazaar.test/api".into(),
            http: HypixelHttpConfig {
                timeout_ms: 1000,
                connect_timeout_ms: 500,
                retry_max_attempts: 5,
                retry_backoff_ms: 10,
            },
            aliases: BTreeMap::new(),
            api_key: Some("secret".into()),
        };

        let client = HypixelClient::from_config(&config);
        assert_eq!(client.api_url, "https://bazaar.test/api");
        assert_eq!(client.api_key.as_deref(), Some("secret"));
        assert_eq!(client.retry_max_attempts, 5);
        assert_eq!(client.source_name(), "Hypixel bazaar");
    }

    #[test]
    fn snapshot_uses_upstream_timestamp() {
        let client = HypixelClient::new("https://bazaar.test".into());
        let snapshot = client
            .snapshot_from(response(&[("SHARD_ZOMBIE", 2.0)]))
            .unwrap();

        assert_eq!(snapshot.origin(), QuoteOrigin::Live);
        assert_eq!(snapshot.captured_at().timestamp_millis(), 1_760_000_000_000);
        assert_eq!(snapshot.get("SHARD_ZOMBIE").unwrap().buy_price, Some(2.0));
    }

    #[test]
    fn unsuccessful_payload_is_quote_unavailable() {
        let client = HypixelClient::new("https://bazaar.test".into());
        let mut failed = response(&[]);
        failed.success = false;
        failed.cause = Some("Invalid API key".into());

        let err = client.snapshot_from(failed).unwrap_err();
        assert!(matches!(err, Error::QuoteUnavailable(cause) if cause == "Invalid API key"));
    }

    #[test]
    fn aliases_copy_only_listed_sources() {
        let mut quotes: HashMap<ProductId, MarketQuote> = [
            (ProductId::new("SHARD_SEA_ARCHER"), quote(9.0)),
        ]
        .into_iter()
        .collect();
        let aliases = BTreeMap::from([
            ("SHARD_BOGGED".to_string(), "SHARD_SEA_ARCHER".to_string()),
            ("SHARD_LOCH_EMPEROR".to_string(), "SHARD_SEA_EMPEROR".to_string()),
        ]);

        apply_aliases(&mut quotes, &aliases);

        assert_eq!(quotes.get("SHARD_BOGGED"), Some(&quote(9.0)));
        assert!(!quotes.contains_key("SHARD_LOCH_EMPEROR"));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_http_error() {
        let client = HypixelClient::new("http://127.0.0.1:9/bazaar".into());
        let err = client.fetch_quotes().await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}

//! Hypixel API configuration.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Bazaar endpoint, HTTP behaviour and quote aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct HypixelConfig {
    /// Bazaar endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// HTTP client settings.
    #[serde(default)]
    pub http: HypixelHttpConfig,
    /// Target product id → source product id. The source's quote is copied
    /// onto the target when the source is listed.
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
    /// API key, loaded from `HYPIXEL_TOKEN` (never from config file).
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_api_url() -> String {
    "https://api.hypixel.net/v2/skyblock/bazaar".into()
}

fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("SHARD_BOGGED".to_string(), "SHARD_SEA_ARCHER".to_string()),
        ("SHARD_LOCH_EMPEROR".to_string(), "SHARD_SEA_EMPEROR".to_string()),
    ])
}

impl Default for HypixelConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            http: HypixelHttpConfig::default(),
            aliases: default_aliases(),
            api_key: None,
        }
    }
}

/// HTTP client behaviour for bazaar requests.
#[derive(Debug, Clone, Deserialize)]
pub struct HypixelHttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    10_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    3000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    500
}

impl Default for HypixelHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
        }
    }
}

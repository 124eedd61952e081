//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the bazaar API key comes from the
//! `HYPIXEL_TOKEN` environment variable only.
//!
//! # Example
//!
//! ```no_run
//! use shardsmith::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::market::MarketConfig;
use super::profit::ProfitConfig;
use super::sources::SourcesConfig;
use crate::domain::NameCorrections;
use crate::error::{ConfigError, Result};

/// Environment variable holding the Hypixel API key.
pub const API_KEY_ENV: &str = "HYPIXEL_TOKEN";

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file.
    ///
    /// Defaults to "shard_recipes.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Input files for `build`.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Metadata name → corrected display name.
    #[serde(default)]
    pub name_corrections: NameCorrections,

    /// Quote acquisition.
    #[serde(default)]
    pub market: MarketConfig,

    /// Profit computation and ranking.
    #[serde(default)]
    pub profit: ProfitConfig,
}

fn default_database_path() -> String {
    "shard_recipes.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            sources: SourcesConfig::default(),
            name_corrections: NameCorrections::default(),
            market: MarketConfig::default(),
            profit: ProfitConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Never from the config file.
        config.market.hypixel.api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.sources.metadata_path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "metadata_path",
            }
            .into());
        }
        if self.sources.fusion_table_path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "fusion_table_path",
            }
            .into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }

        let api_url = url::Url::parse(&self.market.hypixel.api_url).map_err(|e| {
            ConfigError::InvalidValue {
                field: "api_url",
                reason: e.to_string(),
            }
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: "must use http or https".to_string(),
            }
            .into());
        }
        if self.market.snapshot_path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "snapshot_path",
            }
            .into());
        }
        if self.market.hypixel.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.market.hypixel.http.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry_max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if let Some((target, _)) = self
            .market
            .hypixel
            .aliases
            .iter()
            .find(|(target, source)| target == source)
        {
            return Err(ConfigError::InvalidValue {
                field: "aliases",
                reason: format!("{target} aliases itself"),
            }
            .into());
        }

        let weights = self.profit.weights();
        if !weights.profit.is_finite() || !weights.demand.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "weights",
                reason: "ranking weights must be finite".to_string(),
            }
            .into());
        }
        if let Some(bonus) = &self.profit.family_bonus {
            if bonus.family.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "family" }.into());
            }
            if !bonus.multiplier.is_finite() || bonus.multiplier <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "multiplier",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

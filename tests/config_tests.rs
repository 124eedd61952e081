use std::fs;

use shardsmith::domain::PriceSide;
use shardsmith::error::{ConfigError, Error};
use shardsmith::infrastructure::config::market::QuoteSourceKind;
use shardsmith::infrastructure::config::settings::Config;

#[test]
fn config_loads_example_template() {
    let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example"))
        .expect("example config is valid");

    assert_eq!(config.database, "shard_recipes.db");
    assert_eq!(config.sources.header_skip_rows, 1);
    assert_eq!(config.name_corrections.len(), 2);
    assert_eq!(config.name_corrections.apply("Sea Serpant"), "Sea Serpent");
    assert_eq!(
        config
            .market
            .hypixel
            .aliases
            .get("SHARD_BOGGED")
            .map(String::as_str),
        Some("SHARD_SEA_ARCHER")
    );
    assert!(config.profit.family_bonus.is_none());
}

#[test]
fn config_load_reports_missing_file() {
    let err = Config::load("/nonexistent/shardsmith.toml").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn config_reports_toml_syntax_errors() {
    let err = Config::parse_toml("[profit\nskip_empty_orders = true").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn config_rejects_unknown_price_side() {
    let err = Config::parse_toml("[profit]\ningredient_price = \"mid\"").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn config_rejects_empty_database_path() {
    let err = Config::parse_toml("database = \"  \"").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingField { field: "database" })
    ));
}

#[test]
fn config_rejects_zero_retry_attempts() {
    let err = Config::parse_toml("[market.http]\nretry_max_attempts = 0").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "retry_max_attempts",
            ..
        })
    ));
}

#[test]
fn config_from_file_applies_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
database = "prices.db"

[market]
source = "stored"

[profit]
ingredient_price = "sell"
profit_weight = 0.5
demand_weight = 0.5
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.database, "prices.db");
    assert_eq!(config.market.source, QuoteSourceKind::Stored);
    assert_eq!(config.profit.ingredient_price, PriceSide::Sell);
    assert_eq!(config.profit.output_price, PriceSide::Buy);
    let weights = config.profit.weights();
    assert_eq!((weights.profit, weights.demand), (0.5, 0.5));
}

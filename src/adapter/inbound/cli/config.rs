//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::API_KEY_ENV;
use crate::infrastructure::config::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your source paths", path.display()));
    output::note(&format!("2. Optionally set {API_KEY_ENV} for authenticated bazaar requests"));
    output::note(&format!("3. Run: shardsmith build -c {}", path.display()));
    output::note(&format!("4. Run: shardsmith profits -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "database": config.database,
            "logging": { "level": config.logging.level, "format": config.logging.format },
            "sources": {
                "metadata_path": config.sources.metadata_path,
                "fusion_table_path": config.sources.fusion_table_path,
                "header_skip_rows": config.sources.header_skip_rows,
            },
            "name_corrections": config.name_corrections,
            "market": {
                "source": config.market.source.to_string(),
                "api_url": config.market.hypixel.api_url,
                "snapshot_path": config.market.snapshot_path,
                "aliases": config.market.hypixel.aliases,
                "api_key_loaded": config.market.hypixel.api_key.is_some(),
            },
            "profit": {
                "skip_empty_orders": config.profit.skip_empty_orders,
                "ingredient_price": config.profit.ingredient_price,
                "output_price": config.profit.output_price,
                "profit_weight": config.profit.profit_weight,
                "demand_weight": config.profit.demand_weight,
            },
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Database", &config.database);

    output::section("Sources");
    output::field("Metadata", &config.sources.metadata_path);
    output::field("Fusions", &config.sources.fusion_table_path);
    output::field("Skip rows", config.sources.header_skip_rows);
    if config.name_corrections.is_empty() {
        output::note("(no name corrections)");
    } else {
        for (from, to) in config.name_corrections.iter() {
            output::note(&format!("- {from} → {to}"));
        }
    }

    output::section("Market");
    output::field("Source", config.market.source);
    output::field("API", &config.market.hypixel.api_url);
    output::field("Snapshot", &config.market.snapshot_path);
    output::field("Aliases", config.market.hypixel.aliases.len());
    if config.market.hypixel.api_key.is_some() {
        output::success(&format!("API key loaded from {API_KEY_ENV}"));
    } else {
        output::note(&format!("{API_KEY_ENV} not set (unauthenticated requests)"));
    }

    output::section("Profit");
    output::field("Skip empty", config.profit.skip_empty_orders);
    output::field("Ingredients", config.profit.ingredient_price);
    output::field("Output", config.profit.output_price);
    output::field(
        "Weights",
        format!(
            "profit {} / demand {}",
            config.profit.profit_weight, config.profit.demand_weight
        ),
    );
    if let Some(bonus) = &config.profit.family_bonus {
        output::field("Family bonus", format!("{} ×{}", bonus.family, bonus.multiplier));
    }

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    Config::load(path)?;
    output::success("Config file is valid");
    output::field(
        "Next",
        format!("shardsmith config show -c {}", path.display()),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    #[test]
    fn config_template_parses_as_valid_config() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.name_corrections.apply("Star Centry"), "Star Sentry");
    }

    #[test]
    fn execute_init_writes_template_content() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        execute_init(&config_path, false).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, CONFIG_TEMPLATE);
    }

    #[test]
    fn execute_init_fails_if_file_exists_without_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "existing content").unwrap();

        assert!(execute_init(&config_path, false).is_err());
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "existing content");
    }

    #[test]
    fn execute_init_overwrites_with_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "existing content").unwrap();

        execute_init(&config_path, true).unwrap();
        assert_eq!(fs::read_to_string(&config_path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn execute_validate_rejects_bad_config() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[logging]\nformat = \"xml\"\n").unwrap();

        assert!(execute_validate(&config_path).is_err());
    }

    #[test]
    fn execute_show_reads_template() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, CONFIG_TEMPLATE).unwrap();

        assert!(execute_show(&config_path).is_ok());
    }
}

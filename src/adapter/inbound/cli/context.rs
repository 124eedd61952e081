//! Configuration, logging and store setup shared by the data commands.

use std::path::Path;

use tracing::debug;

use super::command::{StoreArgs, DEFAULT_CONFIG};
use super::output;
use crate::adapter::outbound::sqlite::database::connection::create_pool;
use crate::adapter::outbound::sqlite::SqliteStore;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Load the configuration named by `--config`.
///
/// Without an explicit path, `config.toml` is used when it exists and the
/// built-in defaults otherwise. An explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG),
        None => Config::parse_toml(""),
    }
}

/// Install the tracing subscriber, letting `-v`/`-q` adjust the level.
pub fn init_logging(config: &Config) {
    let level = match output::verbosity() {
        0 if output::is_quiet() => "warn",
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    config.logging.init_with_level(level);
}

/// Load config, start logging, and open the store.
pub fn prepare(args: &StoreArgs) -> Result<(Config, SqliteStore)> {
    let config = load_config(args.config.as_deref())?;
    init_logging(&config);
    let store = open_store(&config, args.db.as_deref())?;
    Ok((config, store))
}

/// Open the SQLite store at `db`, or at the configured database path.
pub fn open_store(config: &Config, db: Option<&Path>) -> Result<SqliteStore> {
    let path = db.map_or_else(|| config.database.clone(), |p| p.display().to_string());
    debug!(database = %path, "Opening recipe store");
    Ok(SqliteStore::new(create_pool(&path)?))
}

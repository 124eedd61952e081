//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::path::Path;

use shardsmith::adapter::outbound::sqlite::database::connection::create_pool;
use shardsmith::adapter::outbound::sqlite::SqliteStore;

/// Open a store backed by a fresh database file in `dir`.
pub fn temp_store(dir: &Path) -> SqliteStore {
    let path = dir.join("shard_recipes.db");
    let pool = create_pool(path.to_str().expect("utf-8 temp path")).expect("create sqlite pool");
    SqliteStore::new(pool)
}

/// Write a config file pointing every path into `dir`.
pub fn write_config(dir: &Path, snapshot: &Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    let content = format!(
        r#"database = "{db}"

[logging]
level = "warn"

[sources]
metadata_path = "{metadata}"
fusion_table_path = "{fusions}"
header_skip_rows = 1

[market]
source = "file"
snapshot_path = "{snapshot}"
write_snapshot = false
"#,
        db = dir.join("shard_recipes.db").display(),
        metadata = dir.join("shards_cleaned.json").display(),
        fusions = dir.join("fusions.csv").display(),
        snapshot = snapshot.display(),
    );
    std::fs::write(&path, content).expect("write config");
    path
}

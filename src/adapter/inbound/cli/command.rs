//! Command-line interface definitions.
//!
//! Defines the CLI structure for shardsmith using `clap`: rebuilding the
//! recipe store, capturing bazaar quotes, ranking fusion profits and looking
//! up where a shard is used.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::infrastructure::config::market::QuoteSourceKind;

/// Default configuration file, resolved against the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Shard fusion profit calculator for the SkyBlock bazaar
#[derive(Parser, Debug)]
#[command(name = "shardsmith")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the recipe tables from the fusion list and shard metadata
    Build(BuildArgs),

    /// Fetch bazaar quotes and store them
    Fetch(FetchArgs),

    /// Compute and rank fusion profits
    Profits(ProfitsArgs),

    /// List stored recipes that consume a shard
    Uses(UsesArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `shardsmith config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Configuration and database location shared by the data commands.
///
/// Without `--config`, `config.toml` is used when present and built-in
/// defaults otherwise.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the SQLite database path.
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Shard metadata JSON (overrides `sources.metadata_path`).
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Fusion list CSV (overrides `sources.fusion_table_path`).
    #[arg(long)]
    pub fusion_table: Option<PathBuf>,

    /// Title rows before the CSV header (overrides `sources.header_skip_rows`).
    #[arg(long)]
    pub skip_rows: Option<usize>,
}

/// Arguments for `fetch`.
#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Do not write the JSON snapshot file.
    #[arg(long)]
    pub no_snapshot: bool,
}

/// Quote source selectable from the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SourceArg {
    Live,
    File,
    Stored,
}

impl From<SourceArg> for QuoteSourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Live => QuoteSourceKind::Live,
            SourceArg::File => QuoteSourceKind::File,
            SourceArg::Stored => QuoteSourceKind::Stored,
        }
    }
}

/// Arguments for `profits`.
#[derive(Args, Debug)]
pub struct ProfitsArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Quote source (overrides `market.source`).
    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,

    /// Use the stored snapshot if the live fetch fails.
    #[arg(long)]
    pub fallback_stored: bool,

    /// Number of ranked entries to display.
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    /// Write the ranked list to a JSON report (overrides `profit.report_path`).
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Keep recipes whose ingredients have no buy orders.
    #[arg(long)]
    pub include_empty_orders: bool,
}

/// Arguments for `uses`.
#[derive(Args, Debug)]
pub struct UsesArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Shard display name or product id.
    pub shard: String,
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value = DEFAULT_CONFIG)]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profits_with_overrides() {
        let cli = Cli::try_parse_from([
            "shardsmith",
            "--json",
            "profits",
            "--source",
            "stored",
            "-n",
            "5",
            "--db",
            "x.db",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::Profits(args) = cli.command else {
            panic!("expected profits");
        };
        assert!(matches!(args.source, Some(SourceArg::Stored)));
        assert_eq!(args.limit, 5);
        assert_eq!(args.store.db, Some(PathBuf::from("x.db")));
    }

    #[test]
    fn parses_uses_with_spaced_name() {
        let cli = Cli::try_parse_from(["shardsmith", "uses", "Sea Serpent", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        let Commands::Uses(args) = cli.command else {
            panic!("expected uses");
        };
        assert_eq!(args.shard, "Sea Serpent");
    }

    #[test]
    fn config_validate_defaults_path() {
        let cli = Cli::try_parse_from(["shardsmith", "config", "validate"]).unwrap();
        let Commands::Config(ConfigCommand::Validate(arg)) = cli.command else {
            panic!("expected config validate");
        };
        assert_eq!(arg.config, PathBuf::from(DEFAULT_CONFIG));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

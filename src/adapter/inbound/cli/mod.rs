//! CLI module graph and command dispatch.

pub mod build;
pub mod command;
pub mod config;
pub mod context;
pub mod fetch;
pub mod output;
pub mod profits;
pub mod uses;

use command::{Cli, Commands, ConfigCommand};
use output::OutputConfig;

use crate::error::Result;

/// Apply global flags and run the selected command.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match &cli.command {
        Commands::Build(args) => build::execute(args),
        Commands::Fetch(args) => fetch::execute(args).await,
        Commands::Profits(args) => profits::execute(args).await,
        Commands::Uses(args) => uses::execute(args),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(&arg.config),
    }
}

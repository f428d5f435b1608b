//! SocialFlow CLI host: bootstrap and command dispatch.

pub mod bootstrap;
pub mod cli;
pub mod commands;

use sf_core::config::AppConfig;

use crate::bootstrap::AppContext;
use crate::cli::Cli;

/// Build the services for `config` and execute the parsed command.
pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    if cli.ephemeral {
        config.cache.dir = None;
    }

    let ctx = AppContext::build(config)?;
    commands::dispatch(&ctx, cli.command).await
}

use anyhow::Context;
use clap::Parser;

use socialflow_lib::bootstrap::{init_tracing_subscriber, resolve_config};
use socialflow_lib::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref()).context("Failed to load configuration")?;

    init_tracing_subscriber(&config.logging).context("Failed to initialize tracing")?;
    tracing::debug!(?config, "Configuration resolved");

    socialflow_lib::run(cli, config).await
}

//! Command handlers. Results go to stdout as JSON or plain lines; logs go to
//! stderr.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{info, info_span, Instrument};

use sf_core::settings::Settings;
use sf_core::setup::DraftField;

use crate::bootstrap::AppContext;
use crate::cli::{Commands, DraftCommands, EndpointCommands};

pub async fn dispatch(ctx: &AppContext, command: Commands) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match command {
        Commands::Show { cached } => show(ctx, cached, &mut out).await,
        Commands::Refresh => {
            let settings = ctx.store.refresh_settings().await?;
            print_json(&mut out, &settings)
        }
        Commands::Save {
            assignments,
            status,
        } => {
            let mut partial: Settings = assignments.into_iter().collect();
            if let Some(status) = status {
                partial.set_setup_status(status);
            }
            let saved = ctx.store.save(partial).await?;
            print_json(&mut out, &saved)
        }
        Commands::NextStep => {
            let step = ctx.resolve_setup_entry().execute().await;
            writeln!(out, "{step}\t{}", step.route())?;
            Ok(())
        }
        Commands::ClearCache => {
            ctx.store.clear_cache();
            Ok(())
        }
        Commands::WaitCreated { timeout_secs } => wait_created(ctx, timeout_secs, &mut out).await,
        Commands::Draft { command } => draft(ctx, command, &mut out).await,
        Commands::Endpoint { command } => endpoint(ctx, command, &mut out),
    }
}

async fn show(ctx: &AppContext, cached: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let settings = if cached {
        match ctx.store.get_cached_settings() {
            Some(settings) => settings,
            None => bail!("no cached settings; run `socialflow refresh` first"),
        }
    } else {
        ctx.store.get().await?
    };
    print_json(out, &settings)
}

async fn wait_created(
    ctx: &AppContext,
    timeout_secs: Option<u64>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let span = info_span!("command.wait_created", timeout_secs);
    let wait = ctx.wait_for_network_creation();

    let polls = match timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), wait.execute())
            .instrument(span)
            .await
            .with_context(|| format!("network not created within {secs}s"))?,
        None => wait.execute().instrument(span).await,
    };

    info!(polls, "Network ready");
    writeln!(out, "finished")?;
    Ok(())
}

async fn draft(
    ctx: &AppContext,
    command: DraftCommands,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        DraftCommands::Set { field, value } => {
            ctx.draft.stash_key(&field, &value).with_context(|| {
                format!("known draft fields: {}", draft_field_names().join(", "))
            })?;
            Ok(())
        }
        DraftCommands::Show => print_json(out, &ctx.draft.collect()?),
        DraftCommands::Submit { status } => {
            let saved = ctx.submit_setup_draft().execute(status.as_deref()).await?;
            print_json(out, &saved)
        }
    }
}

fn endpoint(
    ctx: &AppContext,
    command: EndpointCommands,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        EndpointCommands::Set { url } => {
            let stored = ctx.endpoints.set(&url)?;
            writeln!(out, "{stored}")?;
        }
        EndpointCommands::Reset => {
            ctx.endpoints.reset()?;
            writeln!(out, "{}", ctx.config.remote.base_url)?;
        }
    }
    Ok(())
}

fn print_json(out: &mut impl Write, value: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn draft_field_names() -> Vec<&'static str> {
    DraftField::ALL.iter().map(|f| f.settings_key()).collect()
}

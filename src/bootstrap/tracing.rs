//! Tracing configuration for the SocialFlow CLI
//!
//! ## Behavior / 行为
//!
//! - **Development**: debug level for workspace crates
//! - **Production**: info level
//! - **Environment filter**: `RUST_LOG` replaces the defaults entirely
//! - **Writers**: stderr always; a daily rolling file when `logging.dir` is set
//!
//! stdout is left to command output so it can be piped.

use std::{fs, io, path::Path, sync::OnceLock};

use anyhow::Context;
use sf_core::config::LoggingConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

const LOG_FILE_PREFIX: &str = "socialflow.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives
///
/// reqwest/hyper connection chatter stays at `warn` in both modes.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        if is_dev { "info" } else { "warn" }.to_string(),
        format!("socialflow={level}"),
        format!("socialflow_lib={level}"),
        format!("sf_app={level}"),
        format!("sf_infra={level}"),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
    ]
}

/// Initialize the global tracing subscriber.
///
/// Call once from `main` after the configuration has been resolved.
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(BoxMakeWriter::new(io::stderr));

    let file_writer = match config.dir.as_deref().map(build_file_writer).transpose() {
        Ok(writer) => writer,
        Err(err) => {
            eprintln!("Failed to initialize file logging, continuing with stderr only: {err:#}");
            None
        }
    };
    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::bootstrap::config::CONFIG_PATH_ENV;

#[derive(Debug, Parser)]
#[command(name = "socialflow")]
#[command(about = "SocialFlow settings cache and setup wizard tool", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Keep the local cache in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the current settings
    Show {
        /// Only consult the local cache, never the network
        #[arg(long)]
        cached: bool,
    },
    /// Re-fetch settings and setup progress from the backend
    Refresh,
    /// Save settings given as key=value pairs
    Save {
        #[arg(value_parser = parse_assignment, required_unless_present = "status")]
        assignments: Vec<(String, Value)>,
        /// Setup status to record alongside the data
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Print the setup wizard step to resume at
    NextStep,
    /// Drop the local settings cache
    ClearCache,
    /// Wait until the backend reports the network as created
    WaitCreated {
        /// Give up after N seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Work with the locally stashed setup wizard draft
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Override the backend base URL
    Endpoint {
        #[command(subcommand)]
        command: EndpointCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum DraftCommands {
    /// Stash one field, e.g. `draft set networkTitle "My network"`
    Set {
        field: String,
        #[arg(value_parser = parse_value)]
        value: Value,
    },
    /// Print every stashed field
    Show,
    /// Save the draft to the backend and clear it
    Submit {
        #[arg(short, long)]
        status: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum EndpointCommands {
    /// Store a new base URL
    Set { url: String },
    /// Go back to the configured base URL
    Reset,
}

/// Parse `key=value`. The value is JSON when it parses as such, otherwise a
/// plain string.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in {raw:?}"));
    }
    Ok((key.to_string(), parse_value(value)?))
}

pub fn parse_value(raw: &str) -> Result<Value, String> {
    Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}

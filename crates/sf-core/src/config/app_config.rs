//! Application configuration domain model
//!
//! Every field has a default so a missing file or a partial file still yields
//! a usable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::settings::SETTINGS_CACHE_KEY;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub remote: RemoteApiConfig,
    pub cache: CacheConfig,
    pub provisioning: ProvisioningConfig,
    pub logging: LoggingConfig,
}

/// HTTP verb used for a write endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WriteMethod {
    Put,
    Post,
    Patch,
}

/// Remote settings/progress service.
///
/// Paths and verbs have changed between backend revisions, so they are not
/// hard-wired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteApiConfig {
    /// Used when no endpoint override has been stored locally.
    pub base_url: String,
    pub settings_path: String,
    pub progress_path: String,
    pub settings_write_method: WriteMethod,
    pub progress_write_method: WriteMethod,
    pub timeout_secs: u64,
}

impl Default for RemoteApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            settings_path: "/configuration/settings".to_string(),
            progress_path: "/setup/progress".to_string(),
            settings_write_method: WriteMethod::Put,
            progress_write_method: WriteMethod::Post,
            timeout_secs: 30,
        }
    }
}

/// Durable cache location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory of the file-backed key/value store. `None` keeps everything
    /// in memory.
    pub dir: Option<PathBuf>,
    pub key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: SETTINGS_CACHE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    pub poll_interval_secs: u64,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// When set, logs are also written to a daily rolling file in this directory.
    pub dir: Option<PathBuf>,
}

//! Snapshot stored in the settings cache tiers.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Fixed key of the durable cache slot.
pub const SETTINGS_CACHE_KEY: &str = "cached_settings";

/// Settings snapshot plus the time it was captured (ms since epoch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Settings,
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(data: Settings, timestamp: i64) -> Self {
        Self { data, timestamp }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

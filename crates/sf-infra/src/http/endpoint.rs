//! Locally persisted override of the backend base URL.

use std::sync::Arc;

use reqwest::Url;
use thiserror::Error;
use tracing::{info, warn};

use sf_core::ports::KeyValueStorePort;

pub const API_ENDPOINT_KEY: &str = "api_endpoint";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid API endpoint {url:?}: {reason}")]
    Invalid { url: String, reason: String },

    #[error("endpoint storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Backend URL chosen by the user, consulted on every request.
pub struct ApiEndpointStore {
    storage: Arc<dyn KeyValueStorePort>,
}

impl ApiEndpointStore {
    pub fn new(storage: Arc<dyn KeyValueStorePort>) -> Self {
        Self { storage }
    }

    /// Stored override, if any. Unreadable storage counts as no override.
    pub fn current(&self) -> Option<String> {
        match self.storage.read(API_ENDPOINT_KEY) {
            Ok(value) => value.filter(|url| !url.trim().is_empty()),
            Err(err) => {
                warn!(error = %err, "Failed to read API endpoint override");
                None
            }
        }
    }

    /// Validate and persist a new base URL. Returns the stored value.
    pub fn set(&self, url: &str) -> Result<String, EndpointError> {
        let url = url.trim();
        let parsed = Url::parse(url).map_err(|e| EndpointError::Invalid {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EndpointError::Invalid {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        self.storage
            .write(API_ENDPOINT_KEY, url)
            .map_err(EndpointError::Storage)?;
        info!(endpoint = url, "API endpoint updated");
        Ok(url.to_string())
    }

    pub fn reset(&self) -> Result<(), EndpointError> {
        self.storage
            .delete(API_ENDPOINT_KEY)
            .map_err(EndpointError::Storage)?;
        info!("API endpoint override removed");
        Ok(())
    }
}

//! Setup progress port
//!
//! The remote service is the authority on the setup stage; this port reads
//! and advances it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ports::errors::RemoteError;

/// Body of the progress endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupProgress {
    pub status: String,
}

impl SetupProgress {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[async_trait]
pub trait SetupProgressPort: Send + Sync {
    async fn get_progress(&self) -> Result<SetupProgress, RemoteError>;

    async fn put_progress(&self, status: &str) -> Result<SetupProgress, RemoteError>;
}

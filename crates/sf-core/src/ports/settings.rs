use async_trait::async_trait;

use crate::ports::errors::RemoteError;
use crate::settings::Settings;

/// Remote configuration object.
#[async_trait]
pub trait RemoteSettingsPort: Send + Sync {
    /// Read the whole configuration object.
    async fn get_settings(&self) -> Result<Settings, RemoteError>;

    /// Merge `partial` into the remote configuration and return the
    /// server's resulting view.
    async fn put_settings(&self, partial: &Settings) -> Result<Settings, RemoteError>;
}

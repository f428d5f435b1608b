use thiserror::Error;

/// Failure of a call to the remote settings/progress service.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("remote returned status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

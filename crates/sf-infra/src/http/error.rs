use reqwest::StatusCode;
use sf_core::ports::RemoteError;

pub(crate) fn from_reqwest(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout
    } else if let Some(status) = error.status() {
        from_status(status)
    } else if error.is_decode() {
        RemoteError::Decode(error.to_string())
    } else {
        RemoteError::Transport(error.to_string())
    }
}

pub(crate) fn from_status(status: StatusCode) -> RemoteError {
    RemoteError::Status {
        code: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    }
}

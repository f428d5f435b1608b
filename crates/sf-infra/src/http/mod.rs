//! HTTP adapters for the remote settings service.

mod client;
mod endpoint;
mod error;

pub use client::HttpSettingsClient;
pub use endpoint::{ApiEndpointStore, EndpointError, API_ENDPOINT_KEY};

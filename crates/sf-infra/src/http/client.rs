//! reqwest client for the settings and setup progress endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, debug_span, Instrument};

use sf_core::config::{RemoteApiConfig, WriteMethod};
use sf_core::ports::{RemoteError, RemoteSettingsPort, SetupProgress, SetupProgressPort};
use sf_core::settings::Settings;

use super::endpoint::ApiEndpointStore;
use super::error::{from_reqwest, from_status};

pub struct HttpSettingsClient {
    client: Client,
    config: RemoteApiConfig,
    endpoint: Option<Arc<ApiEndpointStore>>,
}

impl HttpSettingsClient {
    pub fn new(config: RemoteApiConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build HTTP client failed")?;

        Ok(Self {
            client,
            config,
            endpoint: None,
        })
    }

    /// Resolve the base URL from a stored override before falling back to
    /// `RemoteApiConfig::base_url`.
    pub fn with_endpoint_store(mut self, endpoint: Arc<ApiEndpointStore>) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    fn base_url(&self) -> String {
        self.endpoint
            .as_ref()
            .and_then(|endpoint| endpoint.current())
            .unwrap_or_else(|| self.config.base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url();
        let base = base.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = self.url(path);
        let span = debug_span!("infra.http.request", method = "GET", url = %url);

        async {
            let response = self.client.get(&url).send().await.map_err(from_reqwest)?;
            Self::decode(response).await
        }
        .instrument(span)
        .await
    }

    async fn write_json<B, T>(
        &self,
        method: WriteMethod,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let method = to_method(method);
        let span = debug_span!("infra.http.request", method = %method, url = %url);

        async {
            let response = self
                .client
                .request(method, &url)
                .json(body)
                .send()
                .await
                .map_err(from_reqwest)?;
            Self::decode(response).await
        }
        .instrument(span)
        .await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RemoteError> {
        let status = response.status();
        debug!(status = status.as_u16(), "Response received");

        if !status.is_success() {
            return Err(from_status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

fn to_method(method: WriteMethod) -> Method {
    match method {
        WriteMethod::Put => Method::PUT,
        WriteMethod::Post => Method::POST,
        WriteMethod::Patch => Method::PATCH,
    }
}

#[async_trait]
impl RemoteSettingsPort for HttpSettingsClient {
    async fn get_settings(&self) -> Result<Settings, RemoteError> {
        self.get_json(&self.config.settings_path).await
    }

    async fn put_settings(&self, partial: &Settings) -> Result<Settings, RemoteError> {
        self.write_json(
            self.config.settings_write_method,
            &self.config.settings_path,
            partial,
        )
        .await
    }
}

#[async_trait]
impl SetupProgressPort for HttpSettingsClient {
    async fn get_progress(&self) -> Result<SetupProgress, RemoteError> {
        self.get_json(&self.config.progress_path).await
    }

    async fn put_progress(&self, status: &str) -> Result<SetupProgress, RemoteError> {
        self.write_json(
            self.config.progress_write_method,
            &self.config.progress_path,
            &SetupProgress::new(status),
        )
        .await
    }
}

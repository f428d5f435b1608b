//! Dependency wiring: turns an `AppConfig` into ready-to-use services.

use std::sync::Arc;
use std::time::Duration;

use sf_app::usecases::{
    ResolveSetupEntry, SetupDraft, SubmitSetupDraft, WaitForNetworkCreation,
};
use sf_app::SettingsStore;
use sf_core::config::AppConfig;
use sf_core::ports::KeyValueStorePort;
use sf_infra::{
    ApiEndpointStore, FileKeyValueStore, HttpSettingsClient, InMemoryKeyValueStore, SystemClock,
};
use tracing::info;

/// Long-lived services shared by every command of one process.
pub struct AppContext {
    pub config: AppConfig,
    pub storage: Arc<dyn KeyValueStorePort>,
    pub endpoints: Arc<ApiEndpointStore>,
    pub client: Arc<HttpSettingsClient>,
    pub store: Arc<SettingsStore>,
    pub draft: Arc<SetupDraft>,
}

impl AppContext {
    pub fn build(config: AppConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn KeyValueStorePort> = match &config.cache.dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Using file-backed local storage");
                Arc::new(FileKeyValueStore::new(dir))
            }
            None => {
                info!("Using in-memory local storage");
                Arc::new(InMemoryKeyValueStore::new())
            }
        };

        let endpoints = Arc::new(ApiEndpointStore::new(storage.clone()));
        let client = Arc::new(
            HttpSettingsClient::new(config.remote.clone())?.with_endpoint_store(endpoints.clone()),
        );

        let store = Arc::new(
            SettingsStore::new(
                client.clone(),
                client.clone(),
                storage.clone(),
                Arc::new(SystemClock),
            )
            .with_cache_key(config.cache.key.clone()),
        );
        let draft = Arc::new(SetupDraft::new(storage.clone()));

        Ok(Self {
            config,
            storage,
            endpoints,
            client,
            store,
            draft,
        })
    }

    pub fn resolve_setup_entry(&self) -> ResolveSetupEntry {
        ResolveSetupEntry::new(self.store.clone())
    }

    pub fn submit_setup_draft(&self) -> SubmitSetupDraft {
        SubmitSetupDraft::new(self.draft.clone(), self.store.clone())
    }

    pub fn wait_for_network_creation(&self) -> WaitForNetworkCreation {
        WaitForNetworkCreation::new(
            self.client.clone(),
            Duration::from_secs(self.config.provisioning.poll_interval_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn memory_storage_when_no_cache_dir() {
        let ctx = AppContext::build(AppConfig::default()).unwrap();

        ctx.storage.write("probe", "1").unwrap();

        assert_eq!(ctx.storage.read("probe").unwrap().as_deref(), Some("1"));
        assert!(ctx.store.get_cached_settings().is_none());
    }

    #[test]
    fn file_storage_is_shared_by_draft_and_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.cache.dir = Some(temp_dir.path().to_path_buf());
        let ctx = AppContext::build(config).unwrap();

        ctx.draft
            .stash_key("networkTitle", &json!("Foo"))
            .unwrap();
        ctx.endpoints.set("http://backend:9000").unwrap();

        assert!(temp_dir.path().join("setup_networkTitle").exists());
        assert!(temp_dir.path().join("api_endpoint").exists());
    }
}

//! Settings store
//!
//! Reconciles three tiers of settings: an in-process snapshot, a durable
//! key/value slot, and the remote settings/progress service (the source of
//! truth). It is also the guard of the forward-only setup status.

use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};

use sf_core::ports::{
    ClockPort, KeyValueStorePort, RemoteError, RemoteSettingsPort, SetupProgressPort,
};
use sf_core::settings::{CacheEntry, Settings, SETTINGS_CACHE_KEY};
use sf_core::setup::StatusTransition;

#[derive(Debug, Error)]
pub enum SettingsStoreError {
    #[error("remote settings service unavailable: {0}")]
    RemoteUnavailable(#[from] RemoteError),
}

/// Settings cache shared by every caller of one running instance.
///
/// Construct once and hand out `Arc<SettingsStore>`; a fresh instance starts
/// with an empty in-process tier.
pub struct SettingsStore {
    remote: Arc<dyn RemoteSettingsPort>,
    progress: Arc<dyn SetupProgressPort>,
    durable: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
    cache_key: String,
    // Never held across an await point.
    memory: RwLock<Option<CacheEntry>>,
}

impl SettingsStore {
    pub fn new(
        remote: Arc<dyn RemoteSettingsPort>,
        progress: Arc<dyn SetupProgressPort>,
        durable: Arc<dyn KeyValueStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            remote,
            progress,
            durable,
            clock,
            cache_key: SETTINGS_CACHE_KEY.to_string(),
            memory: RwLock::new(None),
        }
    }

    /// Use a different durable cache slot.
    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = cache_key.into();
        self
    }

    /// Current settings: in-process tier, then durable tier, then remote.
    ///
    /// # Returns / 返回值
    /// - `Ok(Settings)` - the first snapshot found
    /// - `Err(SettingsStoreError::RemoteUnavailable)` if both cache tiers
    ///   missed and the remote fetch failed
    pub async fn get(&self) -> Result<Settings, SettingsStoreError> {
        let span = info_span!("usecase.settings_store.get");

        async {
            if let Some(settings) = self.get_cached_settings() {
                debug!("Serving settings from cache");
                return Ok(settings);
            }

            info!("Settings cache empty, fetching from remote");
            self.fetch_and_cache().await
        }
        .instrument(span)
        .await
    }

    /// Read settings and setup progress from the remote together and replace
    /// both cache tiers with the merged snapshot.
    ///
    /// The progress endpoint is authoritative for `setupStatus`; any status
    /// field in the settings payload is overwritten.
    pub async fn fetch_and_cache(&self) -> Result<Settings, SettingsStoreError> {
        let span = info_span!("usecase.settings_store.fetch_and_cache");

        async {
            let (mut settings, progress) =
                futures::try_join!(self.remote.get_settings(), self.progress.get_progress())?;

            settings.set_setup_status(progress.status);

            let entry = CacheEntry::new(settings.clone(), self.clock.now_ms());
            self.store_entry(entry);

            info!(
                keys = settings.len(),
                setup_status = settings.setup_status().unwrap_or("<none>"),
                "Settings refreshed from remote"
            );
            Ok(settings)
        }
        .instrument(span)
        .await
    }

    /// Persist a partial update and return the refreshed snapshot.
    ///
    /// ## Behavior / 行为
    /// - `setupStatus` is split from the rest of the data
    /// - A status that would move back to an earlier known stage is dropped
    /// - Settings and progress writes run concurrently; empty parts are skipped
    /// - The cache is re-derived from the remote after both writes succeed
    ///
    /// If a write fails the caches keep their previous contents.
    pub async fn save(&self, partial: Settings) -> Result<Settings, SettingsStoreError> {
        let span = info_span!("usecase.settings_store.save");

        async {
            let (status, rest) = partial.split_setup_status();
            let status = status.filter(|attempted| self.status_write_allowed(attempted));

            info!(
                keys = rest.len(),
                setup_status = status.as_deref().unwrap_or("<skip>"),
                "Saving settings"
            );

            let settings_write = async {
                if rest.is_empty() {
                    Ok(None)
                } else {
                    self.remote.put_settings(&rest).await.map(Some)
                }
            };
            let progress_write = async {
                match status.as_deref() {
                    Some(status) => self.progress.put_progress(status).await.map(Some),
                    None => Ok(None),
                }
            };

            if let Err(err) = futures::try_join!(settings_write, progress_write) {
                warn!(error = %err, "Saving settings failed, cache left unchanged");
                return Err(err.into());
            }

            self.fetch_and_cache().await
        }
        .instrument(span)
        .await
    }

    /// Cached snapshot without touching the network.
    ///
    /// Falls back to the durable tier and promotes it into memory. `None`
    /// means neither tier holds a usable snapshot.
    pub fn get_cached_settings(&self) -> Option<Settings> {
        if let Some(entry) = self
            .memory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Some(entry.data.clone());
        }

        let entry = self.load_durable()?;
        Some(self.promote(entry))
    }

    /// Capture time (ms since epoch) of the in-process snapshot.
    pub fn cached_at(&self) -> Option<i64> {
        self.memory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|entry| entry.timestamp)
    }

    /// Drop both cache tiers. The remote is not touched.
    pub fn clear_cache(&self) {
        *self.memory.write().unwrap_or_else(PoisonError::into_inner) = None;

        if let Err(err) = self.durable.delete(&self.cache_key) {
            warn!(error = %err, key = %self.cache_key, "Failed to delete durable settings cache");
        }
        info!("Settings cache cleared");
    }

    /// Force a remote round-trip.
    pub async fn refresh_settings(&self) -> Result<Settings, SettingsStoreError> {
        self.fetch_and_cache().await
    }

    fn status_write_allowed(&self, attempted: &str) -> bool {
        let current = self
            .get_cached_settings()
            .and_then(|settings| settings.setup_status().map(str::to_owned));

        let transition = StatusTransition::evaluate(current.as_deref(), attempted);
        match transition {
            StatusTransition::Blocked { current, attempted } => {
                info!(
                    current = %current,
                    attempted = %attempted,
                    "Setup status regression blocked"
                );
            }
            StatusTransition::Unranked => {
                debug!(
                    current = current.as_deref().unwrap_or("<none>"),
                    attempted,
                    "Setup status outside known ordering, writing as-is"
                );
            }
            StatusTransition::Advance => {}
        }
        transition.allows_write()
    }

    fn load_durable(&self) -> Option<CacheEntry> {
        let raw = match self.durable.read(&self.cache_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, key = %self.cache_key, "Failed to read durable settings cache");
                return None;
            }
        };

        match CacheEntry::from_json(&raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(
                    error = %err,
                    key = %self.cache_key,
                    "Durable settings cache is corrupt, ignoring"
                );
                None
            }
        }
    }

    /// Fill the in-process tier from a durable entry unless a fetch filled it
    /// after the fast-path check. Returns whatever the slot holds afterwards.
    fn promote(&self, entry: CacheEntry) -> Settings {
        let mut slot = self.memory.write().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert(entry).data.clone()
    }

    fn store_entry(&self, entry: CacheEntry) {
        match entry.to_json() {
            Ok(raw) => {
                if let Err(err) = self.durable.write(&self.cache_key, &raw) {
                    warn!(
                        error = %err,
                        key = %self.cache_key,
                        "Failed to write durable settings cache"
                    );
                }
            }
            Err(err) => warn!(error = %err, "Failed to serialize settings cache entry"),
        }

        *self.memory.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
    }
}

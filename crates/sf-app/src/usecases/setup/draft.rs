//! In-progress wizard form data.
//!
//! Each wizard page stashes its fields locally so the user can move back and
//! forth between pages; the final page submits everything in one save.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};

use sf_core::ports::KeyValueStorePort;
use sf_core::settings::Settings;
use sf_core::setup::{DraftField, DraftValueKind};

use crate::usecases::{SettingsStore, SettingsStoreError};

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("unknown draft field: {0}")]
    UnknownField(String),

    #[error("draft field {field} expects {expected}, got {found}")]
    InvalidValue {
        field: DraftField,
        expected: &'static str,
        found: &'static str,
    },

    #[error("failed to encode draft value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("draft storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Wizard draft kept in the local key/value store, one slot per field.
pub struct SetupDraft {
    storage: Arc<dyn KeyValueStorePort>,
}

impl SetupDraft {
    pub fn new(storage: Arc<dyn KeyValueStorePort>) -> Self {
        Self { storage }
    }

    /// Text fields keep numbers and booleans as their literal text, so a
    /// title typed as `2024` is stored as `"2024"`.
    pub fn stash(&self, field: DraftField, value: &Value) -> Result<(), DraftError> {
        let value = normalize(field, value)?;
        let raw = serde_json::to_string(&value)?;
        self.storage
            .write(&field.storage_key(), &raw)
            .map_err(DraftError::Storage)?;
        debug!(field = %field, "Stashed setup draft field");
        Ok(())
    }

    /// Stash by settings key, e.g. `"networkTitle"`.
    pub fn stash_key(&self, key: &str, value: &Value) -> Result<(), DraftError> {
        let field = DraftField::from_settings_key(key)
            .ok_or_else(|| DraftError::UnknownField(key.to_string()))?;
        self.stash(field, value)
    }

    /// Stored value of one field. Undecodable values read as absent.
    pub fn load(&self, field: DraftField) -> Result<Option<Value>, DraftError> {
        let Some(raw) = self
            .storage
            .read(&field.storage_key())
            .map_err(DraftError::Storage)?
        else {
            return Ok(None);
        };

        let value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(field = %field, error = %err, "Ignoring undecodable setup draft field");
                return Ok(None);
            }
        };

        match normalize(field, &value) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(field = %field, error = %err, "Ignoring mistyped setup draft field");
                Ok(None)
            }
        }
    }

    /// Every stashed field, keyed by its settings key.
    pub fn collect(&self) -> Result<Settings, DraftError> {
        let mut settings = Settings::new();
        for field in DraftField::ALL {
            if let Some(value) = self.load(field)? {
                settings.insert(field.settings_key(), value);
            }
        }
        Ok(settings)
    }

    pub fn clear(&self) -> Result<(), DraftError> {
        for field in DraftField::ALL {
            self.storage
                .delete(&field.storage_key())
                .map_err(DraftError::Storage)?;
        }
        info!("Setup draft cleared");
        Ok(())
    }
}

fn normalize(field: DraftField, value: &Value) -> Result<Value, DraftError> {
    let invalid = |expected| DraftError::InvalidValue {
        field,
        expected,
        found: json_type(value),
    };

    match (field.value_kind(), value) {
        (DraftValueKind::Text, Value::String(_)) => Ok(value.clone()),
        (DraftValueKind::Text, Value::Number(n)) => Ok(Value::String(n.to_string())),
        (DraftValueKind::Text, Value::Bool(b)) => Ok(Value::String(b.to_string())),
        (DraftValueKind::Text, _) => Err(invalid("text")),
        (DraftValueKind::List, Value::Array(_)) => Ok(value.clone()),
        (DraftValueKind::List, _) => Err(invalid("a list")),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Error)]
pub enum SubmitDraftError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("saving setup draft failed: {0}")]
    Save(#[from] SettingsStoreError),
}

/// Use case for the final wizard submit.
///
/// ## Behavior / 行为
/// - Collects the stashed draft and attaches the optional status
/// - Saves it through the settings store
/// - Clears the draft only after the save succeeded
pub struct SubmitSetupDraft {
    draft: Arc<SetupDraft>,
    store: Arc<SettingsStore>,
}

impl SubmitSetupDraft {
    pub fn new(draft: Arc<SetupDraft>, store: Arc<SettingsStore>) -> Self {
        Self { draft, store }
    }

    pub async fn execute(&self, status: Option<&str>) -> Result<Settings, SubmitDraftError> {
        let span = info_span!("usecase.submit_setup_draft.execute");

        async {
            let mut data = self.draft.collect()?;
            if let Some(status) = status {
                data.set_setup_status(status);
            }

            info!(fields = data.len(), "Submitting setup draft");
            let saved = self.store.save(data).await?;

            if let Err(err) = self.draft.clear() {
                warn!(error = %err, "Setup saved but clearing the draft failed");
            }
            Ok(saved)
        }
        .instrument(span)
        .await
    }
}

//! Business logic use cases
//!
//! ```text
//! [wizard root]
//!         ↓
//! ResolveSetupEntry ── SettingsStore::get ── resolve_next_step
//!         ↓
//! [wizard pages] ── SetupDraft::stash
//!         ↓
//! SubmitSetupDraft ── SettingsStore::save ── fetch_and_cache
//!         ↓
//! WaitForNetworkCreation
//! ```

pub mod settings_store;
pub mod setup;

pub use settings_store::{SettingsStore, SettingsStoreError};
pub use setup::{
    DraftError, ResolveSetupEntry, SetupDraft, SubmitDraftError, SubmitSetupDraft,
    WaitForNetworkCreation,
};

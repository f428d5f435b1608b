//! Setup wizard use cases.

pub mod draft;
pub mod resolve_entry;
pub mod wait_creation;

pub use draft::{DraftError, SetupDraft, SubmitDraftError, SubmitSetupDraft};
pub use resolve_entry::ResolveSetupEntry;
pub use wait_creation::WaitForNetworkCreation;

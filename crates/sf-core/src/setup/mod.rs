//! Setup domain module.
//!
//! This module defines the setup stage ordering, the wizard router and the
//! fields of an in-progress wizard draft.

pub mod draft;
pub mod router;
pub mod status;

pub use draft::{DraftField, DraftValueKind};
pub use router::{resolve_next_step, WizardStep};
pub use status::{SetupStatus, StatusTransition};

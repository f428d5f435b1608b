//! # sf-core
//!
//! Core domain models and setup policy for SocialFlow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod ports;
pub mod settings;
pub mod setup;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use settings::{CacheEntry, Settings, SETUP_STATUS_KEY};
pub use setup::{
    resolve_next_step, DraftField, DraftValueKind, SetupStatus, StatusTransition, WizardStep,
};

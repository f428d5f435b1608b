//! SocialFlow Application Orchestration Layer
//!
//! This crate contains the settings store and the setup wizard use cases.

pub mod usecases;

#[cfg(test)]
pub(crate) mod test_support;

pub use usecases::{SettingsStore, SettingsStoreError};

//! Settings domain module.

pub mod cache;
pub mod model;

pub use cache::{CacheEntry, SETTINGS_CACHE_KEY};
pub use model::{Settings, SETUP_STATUS_KEY};

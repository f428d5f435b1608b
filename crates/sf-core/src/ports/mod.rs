//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and infrastructure
//! implementations, so the settings logic stays independent of HTTP clients
//! and storage backends.

mod clock;
pub mod errors;
pub mod settings;
pub mod setup_progress;
pub mod storage;

pub use clock::ClockPort;
pub use errors::RemoteError;
pub use settings::RemoteSettingsPort;
pub use setup_progress::{SetupProgress, SetupProgressPort};
pub use storage::KeyValueStorePort;

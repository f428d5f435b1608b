pub mod http;
pub mod storage;
pub mod time;

pub use http::{ApiEndpointStore, EndpointError, HttpSettingsClient};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;

pub mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, LoggingConfig, ProvisioningConfig, RemoteApiConfig, WriteMethod,
    DEFAULT_API_URL,
};

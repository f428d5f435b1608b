//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read the TOML configuration file / 读取 TOML 配置文件
//! - Apply environment overrides / 应用环境变量覆盖
//! - Fill in the platform cache directory / 填充平台缓存目录
//!
//! Field defaults live on the `AppConfig` DTO itself; this module never
//! validates values.

use std::path::{Path, PathBuf};

use anyhow::Context;
use sf_core::config::AppConfig;
use sf_infra::storage::DEFAULT_STORE_DIR;

/// Path of the configuration file.
pub const CONFIG_PATH_ENV: &str = "SOCIALFLOW_CONFIG";
/// Overrides `remote.base_url`.
pub const API_URL_ENV: &str = "SOCIALFLOW_API_URL";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML for
/// `AppConfig`.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content).context("Failed to parse config as TOML")
}

/// Build the effective configuration.
///
/// A missing file yields the defaults. Environment overrides are applied on
/// top, then an unset cache directory is pointed at the platform data dir.
pub fn resolve_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut config = match config_path {
        Some(path) if path.exists() => load_config(path)?,
        _ => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    if config.cache.dir.is_none() {
        config.cache.dir = default_cache_dir();
    }
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
        config.remote.base_url = url;
    }
}

fn default_cache_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(DEFAULT_STORE_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::config::WriteMethod;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Test that valid TOML is parsed correctly
    /// 测试有效 TOML 被正确解析
    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [remote]
            base_url = "http://backend:8000"
            settings_path = "/settings"
            settings_write_method = "POST"
            timeout_secs = 3

            [cache]
            dir = "/tmp/socialflow-test"

            [provisioning]
            poll_interval_secs = 2
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.remote.base_url, "http://backend:8000");
        assert_eq!(config.remote.settings_path, "/settings");
        assert_eq!(config.remote.settings_write_method, WriteMethod::Post);
        assert_eq!(config.remote.timeout_secs, 3);
        assert_eq!(config.cache.dir, Some(PathBuf::from("/tmp/socialflow-test")));
        assert_eq!(config.provisioning.poll_interval_secs, 2);
    }

    /// Test that invalid TOML is reported
    /// 测试无效 TOML 报错
    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[remote\nbase_url = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_resolve_config_defaults_when_file_missing() {
        let temp_dir = tempfile::TempDir::new().unwrap();

        let config = resolve_config(Some(&temp_dir.path().join("absent.toml"))).unwrap();

        assert_eq!(config.remote.settings_path, "/configuration/settings");
        assert_eq!(config.provisioning.poll_interval_secs, 5);
    }

    #[test]
    fn test_resolve_config_keeps_explicit_cache_dir() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[cache]\ndir = \"/var/cache/sf\"\n")
            .unwrap();

        let config = resolve_config(Some(temp_file.path())).unwrap();

        assert_eq!(config.cache.dir, Some(PathBuf::from("/var/cache/sf")));
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let mut config = AppConfig::default();

        apply_env_overrides(&mut config, |key| {
            (key == API_URL_ENV).then(|| "http://override:1234".to_string())
        });

        assert_eq!(config.remote.base_url, "http://override:1234");
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        let mut config = AppConfig::default();

        apply_env_overrides(&mut config, |_| Some("  ".to_string()));

        assert_eq!(config.remote.base_url, sf_core::config::DEFAULT_API_URL);
    }
}

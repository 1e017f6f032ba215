use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use catalog_engine::FetchSettings;
use catalog_logging::{catalog_info, catalog_warn};
use serde::{Deserialize, Serialize};
use url::Url;

/// Settings read from the optional RON config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_body_bytes: u64,
    /// Upper bound on waiting for the engine to answer.
    pub wait_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            max_body_bytes: 5 * 1024 * 1024,
            wait_timeout_ms: 60_000,
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> anyhow::Result<FetchSettings> {
        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url {:?}", self.base_url))?;
        Ok(FetchSettings {
            base_url,
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_body_bytes,
        })
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}

/// Loads the config file, falling back to defaults when it is missing or
/// cannot be parsed.
pub(crate) fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            catalog_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            catalog_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            catalog_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(
            &path,
            "(base_url: \"http://catalog.internal:9000/\", request_timeout_ms: 1500)",
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.base_url, "http://catalog.internal:9000/");
        assert_eq!(config.request_timeout_ms, 1500);
        assert_eq!(config.connect_timeout_ms, AppConfig::default().connect_timeout_ms);

        let settings = config.fetch_settings().unwrap();
        assert_eq!(settings.request_timeout, Duration::from_millis(1500));
        assert_eq!(settings.base_url.as_str(), "http://catalog.internal:9000/");
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(&path, "(base_url: 42").unwrap();
        assert_eq!(load_config(&path), AppConfig::default());
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        let config = AppConfig {
            base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(config.fetch_settings().is_err());
    }
}

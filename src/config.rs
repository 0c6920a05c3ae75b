//! Configuration management for the Bookdesk list client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::query::PageSize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Host serving the `/api/<entity>` collection endpoints
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ListConfig {
    pub debounce_ms: u64,
    pub default_page_size: PageSize,
    /// `limit` sent by one-shot exports ("all rows")
    pub export_limit: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // BOOKDESK_API__BASE_URL, BOOKDESK_LIST__DEBOUNCE_MS, ...
            .add_source(
                Environment::with_prefix("BOOKDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", env::var("API_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ListConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            default_page_size: PageSize::default(),
            export_limit: 10_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.list.debounce(), Duration::from_millis(500));
        assert_eq!(config.list.default_page_size, PageSize::Ten);
        assert_eq!(config.list.export_limit, 10_000);
    }

    #[test]
    fn test_page_size_from_source() {
        let config: AppConfig = Config::builder()
            .set_override("list.debounce_ms", 250)
            .unwrap()
            .set_override("list.default_page_size", 50)
            .unwrap()
            .set_override("list.export_limit", 500)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.list.default_page_size, PageSize::Fifty);
        assert_eq!(config.list.debounce_ms, 250);
        assert_eq!(config.api.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_single_key_override_keeps_other_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("api.timeout_secs", 5)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api.timeout(), Duration::from_secs(5));
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.list.debounce_ms, 500);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: AppConfig = Config::builder().build().unwrap().try_deserialize().unwrap();
        assert_eq!(config.list.default_page_size, PageSize::Ten);
        assert_eq!(config.list.export_limit, 10_000);
    }

    #[test]
    fn test_rejects_unknown_page_size() {
        let result: Result<AppConfig, _> = Config::builder()
            .set_override("list.debounce_ms", 500)
            .unwrap()
            .set_override("list.default_page_size", 15)
            .unwrap()
            .set_override("list.export_limit", 500)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize();

        assert!(result.is_err());
    }
}

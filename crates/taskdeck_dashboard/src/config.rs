//! Application configuration for taskdeck

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use taskdeck_backends::{BackendChain, LocalBackend, RemoteBackend, RemoteConfig, TaskBackend};
use taskdeck_constant::{app, defaults};
use taskdeck_core::{KvStore, SqliteKvStore};

use crate::error::{DashboardError, Result};

/// Where tasks are read from and written to.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Remote API base URL
    pub api_url: String,
    /// Bearer token for the remote API
    pub api_token: Option<String>,
    /// Per-request timeout for the remote API
    pub api_timeout: Duration,
    /// Simulated latency of the local fallback store
    pub mock_delay: Duration,
    /// Durable key holding the local task list
    pub storage_key: String,
    /// Directory holding taskdeck.db
    pub data_dir: PathBuf,
    /// Skip the remote API and use the local store only
    pub offline: bool,
}

impl AppConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            api_url: defaults::API_URL.to_string(),
            api_token: None,
            api_timeout: defaults::API_TIMEOUT,
            mock_delay: defaults::MOCK_DELAY,
            storage_key: defaults::STORAGE_KEY.to_string(),
            data_dir: root.join(app::DATA_DIR),
            offline: false,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = timeout;
        self
    }

    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env(root: PathBuf) -> Self {
        let mut config = Self::new(root);

        if let Ok(url) = std::env::var(defaults::env::API_URL) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }

        if let Ok(token) = std::env::var(defaults::env::API_TOKEN) {
            if !token.is_empty() {
                config.api_token = Some(token);
            }
        }

        if let Ok(ms) = std::env::var(defaults::env::API_TIMEOUT_MS) {
            if let Ok(val) = ms.parse::<u64>() {
                config.api_timeout = Duration::from_millis(val);
            }
        }

        if let Ok(ms) = std::env::var(defaults::env::MOCK_DELAY_MS) {
            if let Ok(val) = ms.parse::<u64>() {
                config.mock_delay = Duration::from_millis(val);
            }
        }

        if let Ok(key) = std::env::var(defaults::env::STORAGE_KEY) {
            if !key.is_empty() {
                config.storage_key = key;
            }
        }

        if let Ok(dir) = std::env::var(defaults::env::DATA_DIR) {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }

        if let Ok(flag) = std::env::var(defaults::env::OFFLINE) {
            config.offline = parse_flag(&flag);
        }

        config
    }

    /// Backend over the durable store in `data_dir`.
    pub fn build_backend(&self) -> Result<Arc<dyn TaskBackend>> {
        self.build_backend_with_store(Arc::new(SqliteKvStore::new(&self.data_dir)))
    }

    /// Remote API first, local store second; or the local store alone when offline.
    pub fn build_backend_with_store(&self, store: Arc<dyn KvStore>) -> Result<Arc<dyn TaskBackend>> {
        let local = LocalBackend::new(store)
            .with_key(self.storage_key.clone())
            .with_delay(self.mock_delay);

        if self.offline {
            return Ok(Arc::new(local));
        }

        let mut remote_config = RemoteConfig::new(self.api_url.clone()).with_timeout(self.api_timeout);
        if let Some(token) = &self.api_token {
            remote_config = remote_config.with_token(token.clone());
        }
        let remote = RemoteBackend::new(remote_config)
            .map_err(|e| DashboardError::ConfigError(format!("remote backend: {}", e)))?;

        Ok(Arc::new(BackendChain::with_fallback(remote, local)))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::MemoryKvStore;

    #[test]
    fn test_app_config_new() {
        let config = AppConfig::new(PathBuf::from("/work"));
        assert_eq!(config.api_url, defaults::API_URL);
        assert_eq!(config.api_token, None);
        assert_eq!(config.mock_delay, Duration::from_millis(300));
        assert_eq!(config.storage_key, "mock_todos");
        assert_eq!(config.data_dir, PathBuf::from("/work/.taskdeck"));
        assert!(!config.offline);
    }

    #[test]
    fn test_app_config_builder() {
        let config = AppConfig::new(PathBuf::from("/work"))
            .with_api_url("https://tasks.example.com/api")
            .with_api_token("abc")
            .with_api_timeout(Duration::from_secs(3))
            .with_mock_delay(Duration::ZERO)
            .with_storage_key("demo_todos")
            .with_data_dir(PathBuf::from("/tmp/td"))
            .with_offline(true);

        assert_eq!(config.api_url, "https://tasks.example.com/api");
        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert_eq!(config.api_timeout, Duration::from_secs(3));
        assert_eq!(config.mock_delay, Duration::ZERO);
        assert_eq!(config.storage_key, "demo_todos");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/td"));
        assert!(config.offline);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }

    #[test]
    fn test_offline_builds_local_only() {
        let config = AppConfig::new(PathBuf::from("/work")).with_offline(true);
        let backend = config
            .build_backend_with_store(Arc::new(MemoryKvStore::new()))
            .unwrap();
        assert_eq!(backend.backend_id(), "local");
    }

    #[test]
    fn test_online_builds_chain() {
        let config = AppConfig::new(PathBuf::from("/work"));
        let backend = config
            .build_backend_with_store(Arc::new(MemoryKvStore::new()))
            .unwrap();
        assert_eq!(backend.backend_id(), "chain");
    }

    #[test]
    fn test_blank_api_url_is_config_error() {
        let config = AppConfig::new(PathBuf::from("/work")).with_api_url(" ");
        let result = config.build_backend_with_store(Arc::new(MemoryKvStore::new()));
        assert!(matches!(result, Err(DashboardError::ConfigError(_))));
    }
}

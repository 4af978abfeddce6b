//! Remote backend configuration

use std::time::Duration;

use taskdeck_constant::defaults;

/// Configuration for the remote task API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API base URL, without the `/todos` suffix (e.g. "http://127.0.0.1:8000/api")
    pub base_url: String,
    /// Bearer token sent as `Authorization`, if the API requires one
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: defaults::API_TIMEOUT,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new(defaults::API_URL)
    }
}

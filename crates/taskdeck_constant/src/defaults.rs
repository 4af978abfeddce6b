//! Defaults shared by the backends, the dashboard and the CLI.

use std::time::Duration;

/// Durable key holding the fallback store's JSON array of tasks.
pub const STORAGE_KEY: &str = "mock_todos";

/// Simulated round-trip latency of the fallback store.
pub const MOCK_DELAY: Duration = Duration::from_millis(300);

/// Owner written on every record created by the fallback store.
pub const PLACEHOLDER_OWNER_ID: i64 = 1;

/// Remote API base URL used when none is configured.
pub const API_URL: &str = "http://127.0.0.1:8000/api";

/// Upper bound on a single remote request.
pub const API_TIMEOUT: Duration = Duration::from_secs(10);

/// How long success/info notifications stay visible.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

/// Environment variables read by `AppConfig::from_env`.
pub mod env {
    pub const API_URL: &str = "TASKDECK_API_URL";
    pub const API_TOKEN: &str = "TASKDECK_API_TOKEN";
    pub const API_TIMEOUT_MS: &str = "TASKDECK_API_TIMEOUT_MS";
    pub const MOCK_DELAY_MS: &str = "TASKDECK_MOCK_DELAY_MS";
    pub const STORAGE_KEY: &str = "TASKDECK_STORAGE_KEY";
    pub const DATA_DIR: &str = "TASKDECK_DATA_DIR";
    pub const OFFLINE: &str = "TASKDECK_OFFLINE";
    pub const LOG: &str = "TASKDECK_LOG";

    /// Keys accepted by `taskdeck config set`.
    pub const ALL: &[&str] = &[
        API_URL,
        API_TOKEN,
        API_TIMEOUT_MS,
        MOCK_DELAY_MS,
        STORAGE_KEY,
        DATA_DIR,
        OFFLINE,
        LOG,
    ];

    /// Keys whose values are masked when printed.
    pub const SECRETS: &[&str] = &[API_TOKEN];
}

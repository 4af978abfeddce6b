//! Error types for backend operations.

use taskdeck_core::{CoreError, TaskId};
use thiserror::Error;

/// Errors returned by a `TaskBackend`.
#[derive(Error, Debug)]
pub enum Error {
    /// No task with this id exists in the backend
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    /// Transport failure (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API answered with a non-success status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Durable storage failure in the local store
    #[error("Storage error: {0}")]
    Storage(#[from] CoreError),

    /// Stored or received JSON did not match the task shape
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Backend could not be constructed from its configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A chain was asked to resolve a call with nothing in it
    #[error("No backends configured")]
    NoBackends,
}

impl Error {
    pub fn api(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        Self::Api {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, Error>;

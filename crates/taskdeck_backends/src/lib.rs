//! taskdeck_backends: task store backends and the fallback chain that joins them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    BackendChain                      │
//! │  ┌──────────────────────────────────────────────┐   │
//! │  │  Vec<Arc<dyn TaskBackend>>  (tried in order) │   │
//! │  └──────────────────────────────────────────────┘   │
//! │                 │                  │                 │
//! │                 ▼                  ▼                 │
//! │        ┌────────────────┐  ┌────────────────┐       │
//! │        │ RemoteBackend  │  │ LocalBackend   │       │
//! │        │ (REST, reqwest)│  │ (KvStore, 300ms│       │
//! │        │                │  │  latency)      │       │
//! │        └────────────────┘  └────────────────┘       │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskdeck_backends::{BackendChain, LocalBackend, RemoteBackend, RemoteConfig, TaskBackend};
//! use taskdeck_core::{MemoryKvStore, TaskDraft};
//!
//! # async fn run() -> taskdeck_backends::Result<()> {
//! let remote = RemoteBackend::new(RemoteConfig::new("http://127.0.0.1:8000/api"))?;
//! let local = LocalBackend::new(Arc::new(MemoryKvStore::new()));
//! let chain = BackendChain::with_fallback(remote, local);
//!
//! let task = chain.create(TaskDraft::new("Buy milk")).await?;
//! println!("created #{}", task.id);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod backends;
pub mod error;

#[cfg(test)]
mod tests;

// Re-export core abstractions
pub use backend::{BackendChain, TaskBackend};
pub use error::{Error, Result};

// Re-export backend implementations
pub use backends::local::{Clock, LocalBackend};
pub use backends::remote::{RemoteBackend, RemoteConfig};

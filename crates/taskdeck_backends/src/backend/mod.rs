//! Backend trait and the ordered fallback chain

mod trait_def;

pub use trait_def::TaskBackend;

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use taskdeck_core::{Task, TaskDraft, TaskId};
use taskdeck_observability::{backend_span, record_duration, record_error};
use tracing::{debug, warn, Instrument};

use crate::error::{Error, Result};

/// Ordered list of backends. Each call goes to the first backend; on any error
/// the next one is tried, and so on. The first success wins; if every backend
/// fails the last error is returned.
///
/// Nothing is remembered between calls: every operation starts again from the
/// first backend.
#[derive(Default, Clone)]
pub struct BackendChain {
    backends: Vec<Arc<dyn TaskBackend>>,
}

impl BackendChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary backend with a single fallback.
    pub fn with_fallback<P, F>(primary: P, fallback: F) -> Self
    where
        P: TaskBackend + 'static,
        F: TaskBackend + 'static,
    {
        Self::new().then(primary).then(fallback)
    }

    /// Append a backend. Returns `self` for chaining.
    pub fn then<B: TaskBackend + 'static>(self, backend: B) -> Self {
        self.then_shared(Arc::new(backend))
    }

    /// Append an already shared backend.
    pub fn then_shared(mut self, backend: Arc<dyn TaskBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    /// Backend IDs in the order they are tried.
    pub fn list_backends(&self) -> Vec<String> {
        self.backends
            .iter()
            .map(|b| b.backend_id().to_string())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    async fn resolve<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T>
    where
        F: FnMut(Arc<dyn TaskBackend>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error = None;
        let count = self.backends.len();

        for (idx, backend) in self.backends.iter().enumerate() {
            let span = backend_span!(backend.backend_id(), operation);
            let outcome = async {
                let started = Instant::now();
                let outcome = call(Arc::clone(backend)).await;
                record_duration("duration_ms", started.elapsed());
                if let Err(e) = &outcome {
                    record_error(e);
                }
                outcome
            }
            .instrument(span)
            .await;

            match outcome {
                Ok(value) => {
                    debug!(backend = backend.backend_id(), operation, "backend call succeeded");
                    return Ok(value);
                }
                Err(e) => {
                    if idx + 1 < count {
                        warn!(
                            backend = backend.backend_id(),
                            operation,
                            error = %e,
                            "backend failed, falling back to next backend"
                        );
                    } else {
                        warn!(
                            backend = backend.backend_id(),
                            operation,
                            error = %e,
                            "last backend failed"
                        );
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(Error::NoBackends))
    }
}

#[async_trait]
impl TaskBackend for BackendChain {
    fn backend_id(&self) -> &str {
        "chain"
    }

    async fn list(&self) -> Result<Vec<Task>> {
        self.resolve("list", |b| async move { b.list().await }).await
    }

    async fn create(&self, draft: TaskDraft) -> Result<Task> {
        self.resolve("create", |b| {
            let draft = draft.clone();
            async move { b.create(draft).await }
        })
        .await
    }

    async fn update(&self, id: TaskId, draft: TaskDraft) -> Result<Task> {
        self.resolve("update", |b| {
            let draft = draft.clone();
            async move { b.update(id, draft).await }
        })
        .await
    }

    async fn toggle_complete(&self, id: TaskId, completed: bool) -> Result<Task> {
        self.resolve("toggle_complete", |b| async move {
            b.toggle_complete(id, completed).await
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        self.resolve("delete", |b| async move { b.delete(id).await })
            .await
    }
}

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use taskdeck_core::{MemoryKvStore, Task, TaskDraft, TaskId};
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::backend::{BackendChain, TaskBackend};
use crate::backends::LocalBackend;
use crate::error::{Error, Result};

/// Backend that fails every call and counts how often it was asked.
struct DownBackend {
    id: &'static str,
    calls: Arc<AtomicUsize>,
}

impl DownBackend {
    fn new(id: &'static str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                id,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn fail<T>(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Api {
            status: 503,
            body: format!("{} unavailable", self.id),
        })
    }
}

#[async_trait]
impl TaskBackend for DownBackend {
    fn backend_id(&self) -> &str {
        self.id
    }

    async fn list(&self) -> Result<Vec<Task>> {
        self.fail()
    }

    async fn create(&self, _draft: TaskDraft) -> Result<Task> {
        self.fail()
    }

    async fn update(&self, _id: TaskId, _draft: TaskDraft) -> Result<Task> {
        self.fail()
    }

    async fn toggle_complete(&self, _id: TaskId, _completed: bool) -> Result<Task> {
        self.fail()
    }

    async fn delete(&self, _id: TaskId) -> Result<()> {
        self.fail()
    }
}

fn local() -> LocalBackend {
    LocalBackend::new(Arc::new(MemoryKvStore::new()))
        .with_delay(Duration::ZERO)
        .without_seed()
}

#[test]
fn test_list_backends_in_order() {
    let (down, _) = DownBackend::new("remote");
    let chain = BackendChain::with_fallback(down, local());
    assert_eq!(chain.list_backends(), vec!["remote", "local"]);
    assert!(!chain.is_empty());
}

#[tokio::test]
async fn test_empty_chain_reports_no_backends() {
    let chain = BackendChain::new();
    assert!(chain.is_empty());
    assert!(matches!(chain.list().await, Err(Error::NoBackends)));
}

#[tokio::test]
async fn test_falls_back_on_primary_failure() {
    let (down, calls) = DownBackend::new("remote");
    let chain = BackendChain::with_fallback(down, local());

    let task = chain.create(TaskDraft::new("Buy milk")).await.unwrap();
    assert_eq!(task.id, 1);
    assert_eq!(chain.list().await.unwrap(), vec![task]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_primary_is_retried_on_every_call() {
    let (down, calls) = DownBackend::new("remote");
    let chain = BackendChain::with_fallback(down, local());

    for _ in 0..3 {
        chain.list().await.unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_fallback_error_is_propagated() {
    let (down, _) = DownBackend::new("remote");
    let chain = BackendChain::with_fallback(down, local());

    let err = chain.toggle_complete(42, true).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(42)));
}

#[tokio::test]
async fn test_all_failing_returns_last_error() {
    let (first, first_calls) = DownBackend::new("first");
    let (second, second_calls) = DownBackend::new("second");
    let chain = BackendChain::new().then(first).then(second);

    let err = chain.delete(1).await.unwrap_err();
    assert_eq!(err.to_string(), "API error 503: second unavailable");
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_success_short_circuits() {
    let (down, calls) = DownBackend::new("spare");
    let chain = BackendChain::with_fallback(local(), down);

    chain.create(TaskDraft::new("Walk dog")).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chains_compose() {
    let (down, _) = DownBackend::new("remote");
    let inner = BackendChain::with_fallback(down, local());
    let (outer_down, _) = DownBackend::new("edge");
    let chain = BackendChain::with_fallback(outer_down, inner);

    assert_eq!(chain.list_backends(), vec!["edge", "chain"]);
    let task = chain
        .update(1, TaskDraft::new("nothing here"))
        .await
        .unwrap_err();
    assert!(task.is_not_found());
}

/// Keeps the value of every `error` field recorded on a span.
#[derive(Clone, Default)]
struct SpanErrors(Arc<Mutex<Vec<String>>>);

impl Visit for SpanErrors {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "error" {
            self.0.lock().unwrap().push(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "error" {
            self.0.lock().unwrap().push(value.to_string());
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for SpanErrors {
    fn on_record(&self, _id: &tracing::span::Id, values: &tracing::span::Record<'_>, _ctx: Context<'_, S>) {
        values.record(&mut self.clone());
    }
}

#[tokio::test]
async fn test_failed_call_records_span_error() {
    let errors = SpanErrors::default();
    let subscriber = tracing_subscriber::registry().with(errors.clone());
    let _default = tracing::subscriber::set_default(subscriber);

    let (down, _) = DownBackend::new("remote");
    let chain = BackendChain::with_fallback(down, local());
    chain.list().await.unwrap();

    let errors = errors.0.lock().unwrap().clone();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("remote unavailable"));
}

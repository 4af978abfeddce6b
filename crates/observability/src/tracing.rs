//! Span helpers shared by the taskdeck crates

/// Span around one call to a task backend.
///
/// Declares empty `duration_ms` and `error` fields for [`record_duration`](crate::record_duration)
/// and [`record_error`](crate::record_error).
///
/// ```rust
/// use taskdeck_observability::backend_span;
///
/// let span = backend_span!("remote", "list");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! backend_span {
    ($backend:expr, $operation:expr) => {
        tracing::debug_span!(
            "backend.call",
            backend.id = $backend,
            operation = $operation,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
        )
    };
}

/// Span around one durable key/value access.
///
/// ```rust
/// use taskdeck_observability::storage_span;
///
/// let span = storage_span!("sqlite", "set", "mock_todos");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! storage_span {
    ($backend:expr, $operation:expr, $key:expr) => {
        tracing::debug_span!(
            "storage.operation",
            storage.backend = $backend,
            storage.operation = $operation,
            storage.key = $key,
        )
    };
}

/// Fill the `error` field of the current span. Logging is left to the caller.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", error.to_string());
}

/// Record a duration in milliseconds on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::span::{Id, Record};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::Registry;

    use super::*;

    /// Collects `name=value` for every field recorded after span creation.
    #[derive(Clone, Default)]
    struct Recorded(Arc<Mutex<Vec<String>>>);

    impl Visit for Recorded {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.lock().unwrap().push(format!("{}={}", field.name(), value));
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.0.lock().unwrap().push(format!("{}={}", field.name(), value));
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0.lock().unwrap().push(format!("{}={:?}", field.name(), value));
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for Recorded {
        fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
            values.record(&mut self.clone());
        }
    }

    #[test]
    fn record_helpers_fill_backend_span_fields() {
        let recorded = Recorded::default();
        let subscriber = Registry::default().with(recorded.clone());

        tracing::subscriber::with_default(subscriber, || {
            let span = crate::backend_span!("remote", "list");
            let _guard = span.enter();
            let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "api timed out");
            record_error(&err);
            record_duration("duration_ms", std::time::Duration::from_millis(12));
        });

        let fields = recorded.0.lock().unwrap().clone();
        assert_eq!(fields.len(), 2);
        assert!(fields[0].starts_with("error=") && fields[0].contains("api timed out"));
        assert_eq!(fields[1], "duration_ms=12");
    }
}

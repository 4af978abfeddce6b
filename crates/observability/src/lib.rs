//! taskdeck observability: log filtering, console output and optional OTLP export
//!
//! # Quick Start
//!
//! ```no_run
//! use taskdeck_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("taskdeck")
//!     .with_log_level("debug")
//!     .with_otlp_endpoint("http://localhost:4317");
//! init(config)?;
//!
//! tracing::info!("started");
//! # Ok::<(), taskdeck_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `TASKDECK_LOG`, then `RUST_LOG` - log filter directives
//! - `OTEL_SERVICE_NAME` - service name (default `taskdeck`)
//! - `OTEL_SERVICE_VERSION` - service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP gRPC endpoint; export is off when unset

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, shutdown};
pub use tracing::{record_duration, record_error};

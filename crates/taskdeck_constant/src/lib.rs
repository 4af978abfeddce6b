//! Shared constants for taskdeck.
//!
//! - [`app`]: application metadata and on-disk layout names
//! - [`defaults`]: fallback-store and HTTP defaults, environment variable names

pub mod app;
pub mod defaults;

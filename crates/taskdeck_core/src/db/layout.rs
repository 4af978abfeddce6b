//! Data directory layout.
//!
//! - `taskdeck.db` + WAL: key-value state (fallback task list) and config table.
//! - `env`: optional file synced from the config table for `source .taskdeck/env`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Basename of the DB (SQLite creates .db-wal and .db-shm alongside).
pub const TASKDECK_DB: &str = "taskdeck.db";
/// Env file under the data dir (synced from config table).
pub const ENV_FILE: &str = "env";

/// Ensures `data_dir` exists; returns path to taskdeck.db.
pub fn ensure_data_dir_at(data_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(data_dir).context("create taskdeck data dir")?;
    Ok(data_dir.join(TASKDECK_DB))
}

//! Open the DB with WAL and migrations.

use anyhow::{Context, Result};
use std::path::Path;

use super::layout;
use super::migrations;

/// Opens the DB under a data dir (e.g. ~/.taskdeck or project/.taskdeck).
/// Creates the dir if needed, enables WAL, runs migrations.
pub fn open_db_at(data_dir: &Path) -> Result<rusqlite::Connection> {
    let db_path = layout::ensure_data_dir_at(data_dir)?;
    let conn = rusqlite::Connection::open(&db_path).context("open taskdeck.db")?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;
    migrations::run_all(&conn)?;
    Ok(conn)
}

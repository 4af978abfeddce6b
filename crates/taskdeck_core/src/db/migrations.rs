//! SQL schema. Applied on open.

/// Durable client-side state: one JSON document per key.
pub const KV: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
";

/// Config key-value store (and source for .taskdeck/env).
pub const CONFIG: &str = "
CREATE TABLE IF NOT EXISTS config (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
";

/// Run all migrations on an open connection.
pub fn run_all(conn: &rusqlite::Connection) -> anyhow::Result<()> {
    conn.execute_batch(KV)?;
    conn.execute_batch(CONFIG)?;
    Ok(())
}

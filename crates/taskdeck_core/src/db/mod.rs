//! SQLite DB under `.taskdeck/`.
//!
//! - `taskdeck.db` + WAL: kv table (durable client-side state) and config table.
//! - `env`: optional file synced from config table for `source .taskdeck/env`.

mod config;
mod connection;
mod kv;
mod layout;
mod migrations;

pub use config::{get_config, get_config_value, remove_config, set_config, sync_env_file, unquote_value};
pub use connection::open_db_at;
pub use kv::{get_kv, remove_kv, set_kv, KvStore, MemoryKvStore, SqliteKvStore};
pub use layout::{ensure_data_dir_at, ENV_FILE, TASKDECK_DB};
pub use migrations::run_all as run_migrations;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_data_dir_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join(".taskdeck");
        let db_path = ensure_data_dir_at(&data_dir).unwrap();
        assert_eq!(db_path, data_dir.join(TASKDECK_DB));
        assert!(data_dir.is_dir());
    }

    #[test]
    fn config_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db_at(dir.path()).unwrap();

        set_config(&conn, "TASKDECK_API_URL", "http://localhost:9000/api").unwrap();
        set_config(&conn, "TASKDECK_API_TOKEN", "secret").unwrap();
        set_config(&conn, "TASKDECK_API_URL", "http://localhost:9001/api").unwrap();

        assert_eq!(
            get_config_value(&conn, "TASKDECK_API_URL").unwrap().as_deref(),
            Some("http://localhost:9001/api")
        );
        let all = get_config(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, "TASKDECK_API_TOKEN");

        assert!(remove_config(&conn, "TASKDECK_API_TOKEN").unwrap());
        assert!(!remove_config(&conn, "TASKDECK_API_TOKEN").unwrap());
        assert_eq!(get_config_value(&conn, "TASKDECK_API_TOKEN").unwrap(), None);
    }

    #[test]
    fn sync_env_file_quotes_values() {
        let dir = tempfile::tempdir().unwrap();
        let config = vec![
            ("TASKDECK_API_URL".to_string(), "\"http://x/api\"".to_string()),
            ("TASKDECK_API_TOKEN".to_string(), "a\"b".to_string()),
        ];
        sync_env_file(dir.path(), &config).unwrap();
        let content = std::fs::read_to_string(dir.path().join(ENV_FILE)).unwrap();
        assert!(content.contains("export TASKDECK_API_URL=\"http://x/api\"\n"));
        assert!(content.contains("export TASKDECK_API_TOKEN=\"a\\\"b\"\n"));
    }

    #[test]
    fn unquote_strips_one_layer() {
        assert_eq!(unquote_value("\"abc\""), "abc");
        assert_eq!(unquote_value("  abc "), "abc");
        assert_eq!(unquote_value("\""), "\"");
    }
}

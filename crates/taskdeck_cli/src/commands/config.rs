//! `taskdeck config` subcommands.
//!
//! Settings live in the `config` table of `taskdeck.db`, either the project's
//! `.taskdeck/` or `~/.taskdeck/` with `--global`. Every write re-syncs the
//! sibling `env` file so it can be sourced from a shell.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use taskdeck_constant::{app, defaults};
use taskdeck_core::db;

use crate::cli::ConfigAction;
use crate::output;

pub fn handle(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { key, value, global } => set(&data_dir(global)?, &key, &value),
        ConfigAction::Get { key, global } => get(&data_dir(global)?, &key),
        ConfigAction::List { global } => list(&data_dir(global)?),
        ConfigAction::Unset { key, global } => unset(&data_dir(global)?, &key),
    }
}

/// `~/.taskdeck`, or the nearest project `.taskdeck` (created in the working directory if none).
fn data_dir(global: bool) -> Result<PathBuf> {
    if global {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        return Ok(home.join(app::DATA_DIR));
    }
    Ok(crate::project_root()?.join(app::DATA_DIR))
}

/// Upper-cases `key` and checks it is a setting taskdeck reads.
fn normalize_key(key: &str) -> Result<String> {
    let key = key.trim().to_uppercase();
    if defaults::env::ALL.contains(&key.as_str()) {
        Ok(key)
    } else {
        bail!(
            "Unknown setting '{}'. Available: {}",
            key,
            defaults::env::ALL.join(", ")
        )
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn display_value(key: &str, value: &str) -> String {
    let value = db::unquote_value(value);
    if defaults::env::SECRETS.contains(&key) {
        mask_key(value)
    } else {
        value.to_string()
    }
}

fn set(dir: &Path, key: &str, value: &str) -> Result<()> {
    let key = normalize_key(key)?;
    let conn = db::open_db_at(dir)?;
    db::set_config(&conn, &key, &format!("\"{}\"", value))?;
    db::sync_env_file(dir, &db::get_config(&conn)?)?;
    output::success(&format!("Set {} in {}", key, dir.join(db::TASKDECK_DB).display()));
    Ok(())
}

fn get(dir: &Path, key: &str) -> Result<()> {
    let key = normalize_key(key)?;
    let conn = db::open_db_at(dir)?;
    match db::get_config_value(&conn, &key)? {
        Some(value) => output::kv(&key, &display_value(&key, &value)),
        None => output::dim(&format!("{key} is not set")),
    }
    Ok(())
}

fn list(dir: &Path) -> Result<()> {
    let conn = db::open_db_at(dir)?;
    let rows: Vec<(String, String)> = db::get_config(&conn)?
        .into_iter()
        .map(|(k, v)| {
            let shown = display_value(&k, &v);
            (k, shown)
        })
        .collect();
    if rows.is_empty() {
        output::dim(&format!("No settings in {}", dir.display()));
    } else {
        output::settings_table(&rows);
    }
    Ok(())
}

fn unset(dir: &Path, key: &str) -> Result<()> {
    let key = normalize_key(key)?;
    let conn = db::open_db_at(dir)?;
    if db::remove_config(&conn, &key)? {
        db::sync_env_file(dir, &db::get_config(&conn)?)?;
        output::success(&format!("Removed {key}"));
    } else {
        output::warning(&format!("{key} was not set"));
    }
    Ok(())
}

//! CLI entry point for taskdeck.

mod cli;
mod commands;
mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use taskdeck_constant::app;
use taskdeck_core::db;
use taskdeck_observability::ObservabilityConfig;

use crate::cli::Cli;

/// How far up from the working directory project files are searched for.
const MAX_ANCESTORS: usize = 32;

/// Closest ancestor of the working directory (itself included) containing `relative`.
fn find_upwards(relative: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_upwards_from(&cwd, relative)
}

fn find_upwards_from(start: &Path, relative: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_ANCESTORS)
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.exists())
}

/// Directory owning the nearest `.taskdeck/`, or `start` when there is none.
fn project_root_from(start: &Path) -> PathBuf {
    find_upwards_from(start, Path::new(app::DATA_DIR))
        .filter(|dir| dir.is_dir())
        .and_then(|dir| dir.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| start.to_path_buf())
}

/// Root the data directory hangs off, resolved the same way as the config files.
fn project_root() -> std::io::Result<PathBuf> {
    Ok(project_root_from(&std::env::current_dir()?))
}

/// Export every row of the config table under `data_dir` into the process env.
fn export_db_config(data_dir: &Path) {
    if !data_dir.join(db::TASKDECK_DB).exists() {
        return;
    }
    let Ok(conn) = db::open_db_at(data_dir) else {
        return;
    };
    if let Ok(pairs) = db::get_config(&conn) {
        for (k, v) in pairs {
            // Runs before the tokio runtime starts, while the process is single-threaded.
            unsafe { std::env::set_var(&k, db::unquote_value(&v)) };
        }
    }
}

/// Load configuration: DB first (global then project overrides), then env files.
/// Order: 1) ~/.taskdeck/taskdeck.db  2) .taskdeck/taskdeck.db (project)  3) ~/.taskdeck/env  4) .taskdeck/env  5) .env
/// dotenvy never overrides a variable that is already set, so the DB layers win over the files.
fn load_taskdeck_config() {
    let global_dir = dirs::home_dir().map(|home| home.join(app::DATA_DIR));

    if let Some(dir) = &global_dir {
        export_db_config(dir);
    }
    if let Some(db_path) = find_upwards(&Path::new(app::DATA_DIR).join(db::TASKDECK_DB)) {
        if let Some(dir) = db_path.parent() {
            export_db_config(dir);
        }
    }

    if let Some(dir) = &global_dir {
        let env_file = dir.join(db::ENV_FILE);
        if env_file.exists() {
            let _ = dotenvy::from_path(&env_file);
        }
    }
    if let Some(env_file) = find_upwards(&Path::new(app::DATA_DIR).join(db::ENV_FILE)) {
        let _ = dotenvy::from_path(&env_file);
    }
    if let Some(env_file) = find_upwards(Path::new(".env")) {
        let _ = dotenvy::from_path(&env_file);
    }
}

fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_version(app::VERSION);
    if verbose {
        config = config.with_log_level("debug");
    }
    if let Err(e) = taskdeck_observability::init(config) {
        output::warning(&format!("logging disabled: {e}"));
    }
}

fn main() {
    load_taskdeck_config();
    let cli = Cli::parse();
    output::init(cli.output);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            output::error(&format!("failed to start async runtime: {e}"));
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(async {
        // The OTLP batch exporter needs a runtime context.
        init_logging(cli.verbose);
        let result = commands::handle(cli).await;
        taskdeck_observability::shutdown();
        result
    });

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_root_is_nearest_ancestor_with_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(app::DATA_DIR)).unwrap();
        let nested = tmp.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(project_root_from(&nested), tmp.path());
        assert_eq!(project_root_from(tmp.path()), tmp.path());
    }

    #[test]
    fn project_root_falls_back_to_start() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("work");
        std::fs::create_dir(&nested).unwrap();
        // A plain file named like the data dir does not count.
        std::fs::write(tmp.path().join(app::DATA_DIR), "").unwrap();

        assert_eq!(project_root_from(&nested), nested);
    }
}

//! `taskdeck list|add|edit|toggle|delete|stats`.
//!
//! Each command builds a dashboard over the configured backend, runs one
//! action and prints the notifications it produced. Backend failures, blank
//! titles and unknown ids never fail the exit status; only opening the
//! configuration or the store does.

use anyhow::Result;
use taskdeck_core::TaskId;
use taskdeck_dashboard::{AppConfig, Dashboard, Notification, SortKey, StatusFilter, ViewQuery};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::output;

/// Environment configuration rooted at the project's data directory.
pub fn app_config(offline: bool) -> Result<AppConfig> {
    let config = AppConfig::from_env(crate::project_root()?);
    Ok(if offline { config.with_offline(true) } else { config })
}

struct Session {
    dashboard: Dashboard,
    notifications: UnboundedReceiver<Notification>,
}

impl Session {
    fn open(config: &AppConfig) -> Result<Self> {
        tracing::debug!(
            api_url = %config.api_url,
            data_dir = %config.data_dir.display(),
            offline = config.offline,
            "opening dashboard"
        );
        let (dashboard, notifications) = Dashboard::with_channel(config.build_backend()?);
        Ok(Self {
            dashboard,
            notifications,
        })
    }

    async fn load(&mut self) -> bool {
        let spinner = output::spinner("Loading tasks...");
        let loaded = self.dashboard.load().await;
        spinner.finish_and_clear();
        loaded
    }

    /// Print everything the dashboard announced so far.
    fn flush(&mut self) {
        while let Ok(n) = self.notifications.try_recv() {
            output::notification(&n);
        }
    }

    /// Load, or flush the failure notification and report false.
    async fn require_loaded(&mut self) -> bool {
        if self.load().await {
            return true;
        }
        self.flush();
        false
    }

    /// Warn about an id missing from the loaded list. Returns false in that case.
    fn is_known(&self, id: TaskId) -> bool {
        if self.dashboard.task(id).is_some() {
            return true;
        }
        output::warning(&format!("no task with id {id}"));
        false
    }
}

pub async fn list(
    config: &AppConfig,
    search: Option<String>,
    filter: StatusFilter,
    sort: SortKey,
) -> Result<()> {
    let mut session = Session::open(config)?;
    if !session.require_loaded().await {
        return Ok(());
    }

    session.dashboard.set_query(
        ViewQuery::new()
            .with_search(search.unwrap_or_default())
            .with_filter(filter)
            .with_sort(sort),
    );

    let visible = session.dashboard.visible_tasks();
    if visible.is_empty() {
        output::dim(session.dashboard.empty_state_message());
    } else {
        output::task_table(&visible);
    }
    Ok(())
}

/// A blank title creates nothing and prints nothing.
pub async fn add(config: &AppConfig, title: String, description: Option<String>) -> Result<()> {
    let mut session = Session::open(config)?;
    let spinner = output::spinner("Creating task...");
    let created = session
        .dashboard
        .create_task(&title, description.as_deref().unwrap_or(""))
        .await;
    spinner.finish_and_clear();

    session.flush();
    if let Some(task) = created {
        output::data("task", &task);
    }
    Ok(())
}

pub async fn edit(
    config: &AppConfig,
    id: TaskId,
    title: String,
    description: Option<String>,
) -> Result<()> {
    let mut session = Session::open(config)?;
    if !session.require_loaded().await || !session.is_known(id) {
        return Ok(());
    }

    // Without --description the current one is kept.
    let description = match description {
        Some(d) => d,
        None => session
            .dashboard
            .task(id)
            .and_then(|t| t.description.clone())
            .unwrap_or_default(),
    };

    let updated = session.dashboard.update_task(id, &title, &description).await;
    session.flush();
    if let Some(task) = updated {
        output::data("task", &task);
    }
    Ok(())
}

pub async fn toggle(config: &AppConfig, id: TaskId) -> Result<()> {
    let mut session = Session::open(config)?;
    if !session.require_loaded().await || !session.is_known(id) {
        return Ok(());
    }

    let toggled = session.dashboard.toggle_task(id).await;
    session.flush();
    if let Some(task) = toggled {
        if !task.completed {
            output::info(&format!("Task {} marked active", task.id));
        }
        output::data("task", &task);
    }
    Ok(())
}

pub async fn delete(config: &AppConfig, id: TaskId) -> Result<()> {
    let mut session = Session::open(config)?;
    session.dashboard.delete_task(id).await;
    session.flush();
    Ok(())
}

pub async fn stats(config: &AppConfig) -> Result<()> {
    let mut session = Session::open(config)?;
    if !session.require_loaded().await {
        return Ok(());
    }
    output::stats(&session.dashboard.stats());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use taskdeck_core::{KvStore, SqliteKvStore, Task};

    use super::*;

    fn offline_config(root: &std::path::Path) -> AppConfig {
        AppConfig::new(root.to_path_buf())
            .with_offline(true)
            .with_mock_delay(Duration::ZERO)
    }

    async fn stored(config: &AppConfig) -> Option<Vec<Task>> {
        let raw = SqliteKvStore::new(&config.data_dir)
            .get(&config.storage_key)
            .await
            .unwrap()?;
        Some(serde_json::from_str(&raw).unwrap())
    }

    #[tokio::test]
    async fn add_with_blank_title_succeeds_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = offline_config(tmp.path());

        add(&config, "   ".into(), Some("desc".into())).await.unwrap();
        assert!(stored(&config).await.is_none());

        add(&config, "Buy milk".into(), None).await.unwrap();
        let tasks = stored(&config).await.unwrap();
        assert!(tasks.iter().any(|t| t.title == "Buy milk"));
    }

    #[tokio::test]
    async fn toggle_and_edit_of_unknown_id_succeed_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = offline_config(tmp.path());

        toggle(&config, 404).await.unwrap();
        edit(&config, 404, "Renamed".into(), None).await.unwrap();

        // Only the first load's demo data is there, untouched.
        let tasks = stored(&config).await.unwrap();
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks.iter().filter(|t| t.completed).count(), 2);
        assert!(tasks.iter().all(|t| t.title != "Renamed"));
    }

    #[tokio::test]
    async fn edit_with_blank_title_keeps_task() {
        let tmp = tempfile::tempdir().unwrap();
        let config = offline_config(tmp.path());
        stats(&config).await.unwrap();
        let before = stored(&config).await.unwrap();

        edit(&config, before[0].id, " ".into(), None).await.unwrap();
        assert_eq!(stored(&config).await.unwrap(), before);
    }
}

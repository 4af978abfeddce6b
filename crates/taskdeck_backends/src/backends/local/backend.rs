//! Local fallback backend implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use taskdeck_constant::defaults;
use taskdeck_core::{CoreError, KvStore, Task, TaskDraft, TaskId};
use taskdeck_observability::storage_span;
use tokio::sync::Mutex;
use tracing::{debug, Instrument};

use super::seed::demo_tasks;
use crate::backend::TaskBackend;
use crate::error::{Error, Result};

/// Source of "now" for timestamps. Called once per mutation.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Task store over a single durable key.
///
/// Each mutation reads the full list, changes it in memory and writes the full
/// list back. Calls through one `LocalBackend` are serialized; two backends
/// sharing a key are last-writer-wins over the whole list.
pub struct LocalBackend {
    store: Arc<dyn KvStore>,
    key: String,
    delay: Duration,
    seed: bool,
    clock: Clock,
    write_lock: Mutex<()>,
}

impl LocalBackend {
    /// Backend with the default key, 300 ms latency, demo seeding and the system clock.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            key: defaults::STORAGE_KEY.to_string(),
            delay: defaults::MOCK_DELAY,
            seed: true,
            clock: Arc::new(Utc::now),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Start from an empty list instead of the demo dataset.
    pub fn without_seed(mut self) -> Self {
        self.seed = false;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    async fn load(&self) -> Result<Option<Vec<Task>>> {
        let raw = self
            .store
            .get(&self.key)
            .instrument(storage_span!("kv", "get", self.key.as_str()))
            .await?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, tasks: &[Task]) -> Result<()> {
        let raw = serde_json::to_string(tasks)?;
        self.store
            .set(&self.key, &raw)
            .instrument(storage_span!("kv", "set", self.key.as_str()))
            .await?;
        Ok(())
    }

    /// Read-modify-write of one record, under the write lock.
    async fn modify<F>(&self, id: TaskId, change: F) -> Result<Task>
    where
        F: FnOnce(&mut Task, DateTime<Utc>) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.load().await?.unwrap_or_default();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;
        change(task, (self.clock)());
        let updated = task.clone();
        self.save(&tasks).await?;
        Ok(updated)
    }
}

#[async_trait]
impl TaskBackend for LocalBackend {
    fn backend_id(&self) -> &str {
        "local"
    }

    async fn list(&self) -> Result<Vec<Task>> {
        self.simulate_latency().await;
        let _guard = self.write_lock.lock().await;
        match self.load().await? {
            Some(tasks) => Ok(tasks),
            None if self.seed => {
                let tasks = demo_tasks((self.clock)());
                self.save(&tasks).await?;
                debug!(key = %self.key, count = tasks.len(), "seeded local store");
                Ok(tasks)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn create(&self, draft: TaskDraft) -> Result<Task> {
        self.simulate_latency().await;
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.load().await?.unwrap_or_default();

        let id = match tasks.iter().map(|t| t.id).max() {
            Some(max) => max.checked_add(1).ok_or_else(|| {
                Error::Storage(CoreError::Storage(format!("task id space exhausted after {max}")))
            })?,
            None => 1,
        };
        let now = (self.clock)();
        let task = Task {
            id,
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
            created_at: now,
            updated_at: now,
            owner_id: defaults::PLACEHOLDER_OWNER_ID,
        };

        tasks.push(task.clone());
        self.save(&tasks).await?;
        debug!(id, "created task in local store");
        Ok(task)
    }

    async fn update(&self, id: TaskId, draft: TaskDraft) -> Result<Task> {
        self.simulate_latency().await;
        self.modify(id, |task, now| task.apply(&draft, now)).await
    }

    async fn toggle_complete(&self, id: TaskId, completed: bool) -> Result<Task> {
        self.simulate_latency().await;
        self.modify(id, |task, now| task.set_completed(completed, now))
            .await
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        self.simulate_latency().await;
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.load().await?.unwrap_or_default();
        tasks.retain(|t| t.id != id);
        self.save(&tasks).await
    }
}

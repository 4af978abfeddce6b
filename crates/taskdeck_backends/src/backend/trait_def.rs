use async_trait::async_trait;
use taskdeck_core::{Task, TaskDraft, TaskId};

use crate::error::Result;

/// CRUD contract shared by the remote API client, the local fallback store,
/// and chains of either.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Short identifier used in logs (e.g. "remote", "local").
    fn backend_id(&self) -> &str;

    /// All tasks currently held, in store order.
    async fn list(&self) -> Result<Vec<Task>>;

    /// Create a task; the backend assigns `id` and both timestamps.
    async fn create(&self, draft: TaskDraft) -> Result<Task>;

    /// Replace title, description and completion of an existing task.
    async fn update(&self, id: TaskId, draft: TaskDraft) -> Result<Task>;

    /// Set only the completion flag of an existing task.
    async fn toggle_complete(&self, id: TaskId, completed: bool) -> Result<Task>;

    /// Remove a task. Deleting an absent id is not an error for the local store.
    async fn delete(&self, id: TaskId) -> Result<()>;
}

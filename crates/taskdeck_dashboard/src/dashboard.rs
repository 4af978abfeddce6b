//! Dashboard view-state coordinator.
//!
//! Owns the working copy of the task list, the search/filter/sort settings and
//! the add/edit form. Every write goes to the backend first; the local list is
//! patched only after the backend confirms, so there is nothing to roll back.
//! Failures never propagate: they become error notifications and leave the
//! list untouched.

use std::sync::Arc;

use taskdeck_backends::TaskBackend;
use taskdeck_core::{Task, TaskId};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::form::TaskForm;
use crate::notification::Notification;
use crate::stats::Stats;
use crate::view::{derive_view, SortKey, StatusFilter, ViewQuery};

pub const MSG_LOAD_FAILED: &str = "Failed to load tasks";
pub const MSG_CREATED: &str = "Task created successfully!";
pub const MSG_CREATE_FAILED: &str = "Failed to create task";
pub const MSG_UPDATED: &str = "Task updated successfully";
pub const MSG_UPDATE_FAILED: &str = "Failed to update task";
pub const MSG_COMPLETED: &str = "Task completed! Great job!";
pub const MSG_DELETED: &str = "Task deleted";
pub const MSG_DELETE_FAILED: &str = "Failed to delete task";

const EMPTY_SEARCH: &str = "No tasks match your search. Try different keywords.";
const EMPTY_LIST: &str = "Get started by creating your first task.";

pub struct Dashboard {
    backend: Arc<dyn TaskBackend>,
    tasks: Vec<Task>,
    query: ViewQuery,
    form: TaskForm,
    editing: Option<TaskId>,
    loading: bool,
    notify_tx: mpsc::UnboundedSender<Notification>,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn TaskBackend>, notify_tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self {
            backend,
            tasks: Vec::new(),
            query: ViewQuery::default(),
            form: TaskForm::default(),
            editing: None,
            loading: false,
            notify_tx,
        }
    }

    /// Dashboard plus the receiving end of its notifications.
    pub fn with_channel(backend: Arc<dyn TaskBackend>) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(backend, tx), rx)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.query.status_filter = filter;
    }

    pub fn set_sort_key(&mut self, sort: SortKey) {
        self.query.sort_key = sort;
    }

    pub fn set_query(&mut self, query: ViewQuery) {
        self.query = query;
    }

    /// Current projection of `tasks` under the search/filter/sort settings.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        derive_view(&self.tasks, &self.query)
    }

    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    /// Text for an empty projection.
    pub fn empty_state_message(&self) -> &'static str {
        if self.query.search_term.is_empty() {
            EMPTY_LIST
        } else {
            EMPTY_SEARCH
        }
    }

    fn notify(&self, notification: Notification) {
        // A dropped receiver only means nobody is displaying notifications.
        let _ = self.notify_tx.send(notification);
    }

    /// Replace the working list with the backend's. Returns false on failure.
    pub async fn load(&mut self) -> bool {
        self.loading = true;
        let result = self.backend.list().await;
        self.loading = false;

        match result {
            Ok(tasks) => {
                info!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
                true
            }
            Err(e) => {
                error!(error = %e, "failed to fetch tasks");
                self.notify(Notification::error(MSG_LOAD_FAILED));
                false
            }
        }
    }

    // ── Form ───────────────────────────────────────────────────────

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn set_form_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_form_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    /// Prefill the form from a loaded task. Returns false if `id` is not in the list.
    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        let Some(task) = self.task(id) else {
            return false;
        };
        self.form = TaskForm::from_task(task);
        self.editing = Some(id);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.clear();
    }

    /// Create or update from the form, depending on whether an edit is open.
    /// The form is reset only when the write succeeds.
    pub async fn submit(&mut self) -> Option<Task> {
        let form = self.form.clone();
        let saved = match self.editing {
            Some(id) => self.update_task(id, &form.title, &form.description).await,
            None => self.create_task(&form.title, &form.description).await,
        };
        if saved.is_some() {
            self.cancel_edit();
        }
        saved
    }

    // ── Mutations ──────────────────────────────────────────────────

    /// Create an incomplete task. A blank title is a silent no-op.
    pub async fn create_task(&mut self, title: &str, description: &str) -> Option<Task> {
        let draft = TaskForm::new(title, description).to_draft(false)?;

        match self.backend.create(draft).await {
            Ok(task) => {
                self.tasks.push(task.clone());
                self.notify(Notification::success(MSG_CREATED));
                Some(task)
            }
            Err(e) => {
                error!(error = %e, "failed to create task");
                self.notify(Notification::error(MSG_CREATE_FAILED));
                None
            }
        }
    }

    /// Edit title and description of a loaded task, keeping its completion state.
    /// A blank title or an id missing from the list is a silent no-op.
    pub async fn update_task(&mut self, id: TaskId, title: &str, description: &str) -> Option<Task> {
        let completed = self.task(id)?.completed;
        let draft = TaskForm::new(title, description).to_draft(completed)?;

        match self.backend.update(id, draft).await {
            Ok(task) => {
                self.replace(task.clone());
                self.notify(Notification::success(MSG_UPDATED));
                Some(task)
            }
            Err(e) => {
                error!(id, error = %e, "failed to update task");
                self.notify(Notification::error(MSG_UPDATE_FAILED));
                None
            }
        }
    }

    /// Flip completion of a loaded task. Only completing announces itself.
    pub async fn toggle_task(&mut self, id: TaskId) -> Option<Task> {
        let completed = !self.task(id)?.completed;

        match self.backend.toggle_complete(id, completed).await {
            Ok(task) => {
                if task.completed {
                    self.notify(Notification::success(MSG_COMPLETED));
                }
                self.replace(task.clone());
                Some(task)
            }
            Err(e) => {
                error!(id, error = %e, "failed to toggle task");
                self.notify(Notification::error(MSG_UPDATE_FAILED));
                None
            }
        }
    }

    pub async fn delete_task(&mut self, id: TaskId) -> bool {
        match self.backend.delete(id).await {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                self.notify(Notification::info(MSG_DELETED));
                true
            }
            Err(e) => {
                error!(id, error = %e, "failed to delete task");
                self.notify(Notification::error(MSG_DELETE_FAILED));
                false
            }
        }
    }

    fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }
}

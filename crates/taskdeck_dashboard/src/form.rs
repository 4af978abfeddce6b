//! Add/edit form state.

use serde::{Deserialize, Serialize};
use taskdeck_core::{Task, TaskDraft};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Prefill from an existing task for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Draft to send, or `None` when the title is blank. An empty description is sent as absent.
    pub fn to_draft(&self, completed: bool) -> Option<TaskDraft> {
        let draft = TaskDraft {
            title: self.title.clone(),
            description: (!self.description.trim().is_empty()).then(|| self.description.clone()),
            completed,
        };
        draft.has_title().then_some(draft)
    }
}

//! Task record and the payloads used to write it.
//!
//! The wire shape is camelCase JSON (`createdAt`, `updatedAt`, `userId`) and is
//! shared by the remote API and the fallback store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub type TaskId = i64;

/// A single task owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "userId", alias = "ownerId")]
    pub owner_id: i64,
}

impl Task {
    /// Replace the mutable fields from `draft` and refresh `updated_at`.
    pub fn apply(&mut self, draft: &TaskDraft, now: DateTime<Utc>) {
        self.title = draft.title.clone();
        self.description = draft.description.clone();
        self.completed = draft.completed;
        self.touch(now);
    }

    /// Set the completion flag and refresh `updated_at`.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.completed = completed;
        self.touch(now);
    }

    // updated_at never moves behind created_at, even with a skewed clock.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    /// Case-insensitive match on title or description. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// True when the title has at least one non-whitespace character.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.has_title() {
            Ok(())
        } else {
            Err(CoreError::Validation("title must not be blank".to_string()))
        }
    }
}

/// Body of the completion-toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPatch {
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample() -> Task {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        Task {
            id: 7,
            title: "Write report".to_string(),
            description: Some("Quarterly NUMBERS".to_string()),
            completed: false,
            created_at: t0,
            updated_at: t0,
            owner_id: 1,
        }
    }

    #[test]
    fn test_task_wire_shape_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["userId"], 1);
        assert_eq!(json["createdAt"], "2025-01-01T09:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_task_accepts_owner_id_alias() {
        let task: Task = serde_json::from_str(
            r#"{"id":3,"title":"x","completed":true,
                "createdAt":"2025-01-01T09:00:00Z","updatedAt":"2025-01-02T09:00:00Z",
                "ownerId":42}"#,
        )
        .unwrap();
        assert_eq!(task.owner_id, 42);
        assert!(task.completed);
        assert_eq!(task.description, None);
    }

    #[test]
    fn test_description_omitted_when_none() {
        let mut task = sample();
        task.description = None;
        let json = serde_json::to_value(task).unwrap();
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_apply_preserves_identity() {
        let mut task = sample();
        let later = task.created_at + Duration::minutes(5);
        task.apply(&TaskDraft::new("Rewrite report").with_completed(true), later);
        assert_eq!(task.id, 7);
        assert_eq!(task.title, "Rewrite report");
        assert_eq!(task.description, None);
        assert!(task.completed);
        assert_eq!(task.updated_at, later);
        assert!(task.updated_at > task.created_at);
    }

    #[test]
    fn test_touch_never_precedes_created_at() {
        let mut task = sample();
        let earlier = task.created_at - Duration::hours(1);
        task.set_completed(true, earlier);
        assert_eq!(task.updated_at, task.created_at);
    }

    #[test]
    fn test_matches_title_and_description() {
        let task = sample();
        assert!(task.matches("report"));
        assert!(task.matches("numbers"));
        assert!(!task.matches("groceries"));
    }

    #[test]
    fn test_draft_title_validation() {
        assert!(TaskDraft::new("Buy milk").validate().is_ok());
        assert!(!TaskDraft::new("   ").has_title());
        assert!(matches!(
            TaskDraft::new("\t\n").validate(),
            Err(CoreError::Validation(_))
        ));
    }
}

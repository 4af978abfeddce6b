//! Filtered and sorted projection of the task list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taskdeck_core::Task;

/// Which completion states are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    pub fn admits(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown status filter '{}'", other)),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordering of the projection.
///
/// `Priority` has no priority field behind it: it only moves incomplete tasks
/// ahead of completed ones and keeps the existing order otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest `created_at` first
    #[default]
    Date,
    Priority,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Priority => "priority",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" | "newest" => Ok(SortKey::Date),
            "priority" => Ok(SortKey::Priority),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Search, filter and sort settings of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub sort_key: SortKey,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_filter(mut self, filter: StatusFilter) -> Self {
        self.status_filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort_key = sort;
        self
    }
}

/// Apply search, then status filter, then sort. Both sorts are stable.
pub fn derive_view<'a>(tasks: &'a [Task], query: &ViewQuery) -> Vec<&'a Task> {
    let needle = query.search_term.to_lowercase();

    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|t| needle.is_empty() || t.matches(&needle))
        .filter(|t| query.status_filter.admits(t))
        .collect();

    match query.sort_key {
        SortKey::Date => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Priority => view.sort_by_key(|t| t.completed),
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn task(id: i64, title: &str, description: Option<&str>, completed: bool, day: i64) -> Task {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::days(day);
        Task {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            completed,
            created_at: at,
            updated_at: at,
            owner_id: 1,
        }
    }

    fn ids(view: &[&Task]) -> Vec<i64> {
        view.iter().map(|t| t.id).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Buy milk", None, true, 0),
            task(2, "Walk dog", Some("around the PARK"), false, 2),
            task(3, "Pay rent", Some("before friday"), false, 1),
            task(4, "Park car", None, true, 3),
        ]
    }

    #[test]
    fn test_date_sort_newest_first() {
        let tasks = sample();
        assert_eq!(ids(&derive_view(&tasks, &ViewQuery::new())), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_priority_sort_is_stable_incomplete_first() {
        let tasks = sample();
        let view = derive_view(&tasks, &ViewQuery::new().with_sort(SortKey::Priority));
        assert_eq!(ids(&view), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let tasks = sample();
        let view = derive_view(&tasks, &ViewQuery::new().with_search("park"));
        assert_eq!(ids(&view), vec![4, 2]);

        let view = derive_view(&tasks, &ViewQuery::new().with_search("FRIDAY"));
        assert_eq!(ids(&view), vec![3]);

        assert!(derive_view(&tasks, &ViewQuery::new().with_search("zebra")).is_empty());
    }

    #[test]
    fn test_status_filters() {
        let tasks = sample();
        let active = derive_view(&tasks, &ViewQuery::new().with_filter(StatusFilter::Active));
        assert_eq!(ids(&active), vec![2, 3]);

        let completed = derive_view(&tasks, &ViewQuery::new().with_filter(StatusFilter::Completed));
        assert_eq!(ids(&completed), vec![4, 1]);
    }

    #[test]
    fn test_search_and_filter_combine() {
        let tasks = sample();
        let query = ViewQuery::new()
            .with_search("park")
            .with_filter(StatusFilter::Active);
        assert_eq!(ids(&derive_view(&tasks, &query)), vec![2]);
    }

    #[test]
    fn test_filter_and_sort_parse() {
        assert_eq!("Active".parse(), Ok(StatusFilter::Active));
        assert_eq!("done".parse(), Ok(StatusFilter::Completed));
        assert!("archived".parse::<StatusFilter>().is_err());
        assert_eq!("priority".parse(), Ok(SortKey::Priority));
        assert_eq!(SortKey::Date.to_string(), "date");
        assert_eq!(StatusFilter::Completed.to_string(), "completed");
    }
}

//! Demonstration dataset written on first use of an empty local store.

use chrono::{DateTime, Duration, Utc};
use taskdeck_constant::defaults::PLACEHOLDER_OWNER_ID;
use taskdeck_core::Task;

const DEMO: &[(&str, &str, bool, i64)] = &[
    (
        "Setup development environment",
        "Install necessary tools and dependencies",
        true,
        3,
    ),
    (
        "Design dashboard UI",
        "Create wireframes and mockups for the dashboard",
        true,
        2,
    ),
    (
        "Implement authentication",
        "Set up login and registration functionality",
        false,
        1,
    ),
    (
        "Add task filtering",
        "Allow users to filter tasks by status",
        false,
        0,
    ),
];

/// Four demo tasks with ids 1..=4, created 3, 2, 1 and 0 days before `now`.
pub fn demo_tasks(now: DateTime<Utc>) -> Vec<Task> {
    DEMO.iter()
        .zip(1..)
        .map(|(&(title, description, completed, days_ago), id)| {
            let at = now - Duration::days(days_ago);
            Task {
                id,
                title: title.to_string(),
                description: Some(description.to_string()),
                completed,
                created_at: at,
                updated_at: at,
                owner_id: PLACEHOLDER_OWNER_ID,
            }
        })
        .collect()
}

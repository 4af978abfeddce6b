//! Dashboard view state over a task backend: filtering, form handling, stats and notifications.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod notification;
pub mod stats;
pub mod view;

pub use config::AppConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use form::TaskForm;
pub use notification::{Notification, NotificationLevel};
pub use stats::Stats;
pub use view::{derive_view, SortKey, StatusFilter, ViewQuery};

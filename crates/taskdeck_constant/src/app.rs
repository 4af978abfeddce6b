//! Application metadata constants

pub const NAME: &str = "taskdeck";
pub const DISPLAY_NAME: &str = "TaskDeck";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Personal task dashboard with an offline fallback store";

/// Directory name for taskdeck data (global under $HOME, or per project)
pub const DATA_DIR: &str = ".taskdeck";

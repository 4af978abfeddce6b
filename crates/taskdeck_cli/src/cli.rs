//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};
use taskdeck_core::TaskId;
use taskdeck_dashboard::{SortKey, StatusFilter};

/// Personal task dashboard backed by a REST API, with an offline fallback store
#[derive(Parser, Debug)]
#[command(name = "taskdeck", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Skip the remote API and use the local store only
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tasks
    List {
        /// Case-insensitive match on title or description
        #[arg(short, long)]
        search: Option<String>,
        /// Which tasks to show: all, active, completed
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: StatusFilter,
        /// Ordering: date (newest first) or priority (incomplete first)
        #[arg(long, default_value = "date", value_parser = parse_sort)]
        sort: SortKey,
    },
    /// Create a task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change a task's title and description
    Edit {
        id: TaskId,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Flip a task between active and completed
    Toggle { id: TaskId },
    /// Delete a task
    Delete { id: TaskId },
    /// Show total, completed, pending and progress
    Stats,
    /// Read and write taskdeck settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Store a setting (e.g. TASKDECK_API_URL)
    Set {
        key: String,
        value: String,
        /// Write to ~/.taskdeck instead of the project .taskdeck
        #[arg(short, long)]
        global: bool,
    },
    /// Print one setting
    Get {
        key: String,
        #[arg(short, long)]
        global: bool,
    },
    /// Print all stored settings
    List {
        #[arg(short, long)]
        global: bool,
    },
    /// Remove a setting
    Unset {
        key: String,
        #[arg(short, long)]
        global: bool,
    },
}

fn parse_filter(s: &str) -> Result<StatusFilter, String> {
    s.parse()
}

fn parse_sort(s: &str) -> Result<SortKey, String> {
    s.parse()
}

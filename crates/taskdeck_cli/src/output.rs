//! Terminal output helpers: styled text for humans, structured JSON for machines.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for the task list and settings
//! - `indicatif` for the loading spinner

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;
use taskdeck_core::Task;
use taskdeck_dashboard::{Notification, NotificationLevel, Stats};

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if format == OutputFormat::Json {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn envelope(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let msg = Msg {
        level,
        message,
        data,
    };
    serde_json::to_string(&msg).unwrap_or_else(|_| {
        serde_json::json!({ "level": level, "message": message }).to_string()
    })
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    println!("{}", envelope(level, message, data));
}

// ── Messages ───────────────────────────────────────────────────────

pub fn success(text: &str) {
    if is_json() {
        emit_json("success", text, None);
    } else {
        println!("{} {}", style("✓").green(), style(text).bright());
    }
}

pub fn info(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{} {}", style("•").cyan(), text);
    }
}

pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", envelope("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

/// Print a dashboard notification with the style of its level.
pub fn notification(n: &Notification) {
    match n.level {
        NotificationLevel::Success => success(&n.message),
        NotificationLevel::Info => info(&n.message),
        NotificationLevel::Error => error(&n.message),
    }
}

/// Emit an arbitrary serializable value as structured output.
pub fn data<T: Serialize>(label: &str, value: &T) {
    let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
    if is_json() {
        emit_json("data", label, Some(&json_val));
    } else {
        let formatted =
            serde_json::to_string_pretty(&json_val).unwrap_or_else(|_| format!("{label}: <?>"));
        println!("{formatted}");
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        let data = serde_json::json!({ key: value });
        emit_json("info", key, Some(&data));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

// ── Tables ─────────────────────────────────────────────────────────

fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

/// Print tasks in the given order (JSON mode emits the records).
pub fn task_table(tasks: &[&Task]) {
    if is_json() {
        let data = serde_json::json!({ "tasks": tasks });
        emit_json("list", "", Some(&data));
        return;
    }

    let mut table = table();
    table.set_header(vec![
        header_cell("ID"),
        header_cell(""),
        header_cell("Title"),
        header_cell("Description"),
        header_cell("Created"),
    ]);
    for task in tasks {
        let (mark, title) = if task.completed {
            (Cell::new("✓").fg(Color::Green), Cell::new(&task.title).add_attribute(Attribute::CrossedOut))
        } else {
            (Cell::new("○"), Cell::new(&task.title).fg(Color::White))
        };
        table.add_row(vec![
            Cell::new(task.id).fg(Color::DarkGrey),
            mark,
            title,
            Cell::new(task.description.as_deref().unwrap_or("")),
            Cell::new(task.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");
}

/// Print key/value settings as a two-column table.
pub fn settings_table(rows: &[(String, String)]) {
    if is_json() {
        let items: serde_json::Map<String, JsonValue> = rows
            .iter()
            .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
            .collect();
        emit_json("list", "", Some(&JsonValue::Object(items)));
        return;
    }

    let mut table = table();
    table.set_header(vec![header_cell("Key"), header_cell("Value")]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key).fg(Color::Green), Cell::new(value)]);
    }
    println!("{table}");
}

pub fn stats(stats: &Stats) {
    if is_json() {
        data("stats", stats);
        return;
    }
    kv("Total", &stats.total.to_string());
    kv("Completed", &stats.completed.to_string());
    kv("Pending", &stats.pending.to_string());
    kv("Progress", &format!("{}%", stats.progress));
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner on stderr while a backend call runs; hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

//! Terminal and JSON output formatting.
//!
//! Every handler prints through these helpers so that `--json`, `--quiet`
//! and `--color` behave the same across commands. In JSON mode each helper
//! emits one `{"type": ..., "payload": ...}` line instead of styled text.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Style};
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
    /// Style text with ANSI colors.
    pub color: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8, color: bool) -> Self {
        Self {
            json,
            quiet,
            verbose,
            color,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    match cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match cell().write() {
        Ok(mut slot) => *slot = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

/// Number of `-v` flags given.
#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// Whether a line survives `--quiet`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Level {
    Normal,
    Always,
}

/// Route one output event: a JSON line in JSON mode, otherwise `render`
/// with the color flag, unless quiet mode drops it.
fn emit(kind: &str, payload: serde_json::Value, level: Level, render: impl FnOnce(bool)) {
    let config = current();
    if config.json {
        if kind == "error" {
            eprintln!("{}", json!({ "type": kind, "payload": payload }));
        } else {
            println!("{}", json!({ "type": kind, "payload": payload }));
        }
        return;
    }
    if config.quiet && level == Level::Normal {
        return;
    }
    render(config.color);
}

fn paint(value: impl Display, style: Style) -> String {
    if current().color {
        format!("{}", value.style(style))
    } else {
        value.to_string()
    }
}

/// Print the application name and version. Text mode only.
pub fn header(version: &str) {
    let config = current();
    if config.json || config.quiet {
        return;
    }
    println!("{} {}", paint("siteplan", Style::new().bold()), paint(version, Style::new().dimmed()));
    println!();
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        Level::Normal,
        |_| println!("  {} {value}", paint(format!("{label:<18}"), Style::new().dimmed())),
    );
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), Level::Normal, |_| {
        println!("  {} {message}", paint("✓", Style::new().green()));
    });
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    emit("warning", json!({ "message": message }), Level::Always, |_| {
        println!("  {} {message}", paint("⚠", Style::new().yellow()));
    });
}

/// Print an error line to stderr. Shown even in quiet mode.
pub fn error(message: &str) {
    emit("error", json!({ "message": message }), Level::Always, |_| {
        eprintln!("  {} {message}", paint("×", Style::new().red()));
    });
}

pub fn section(title: &str) {
    emit("section", json!({ "title": title }), Level::Normal, |_| {
        println!();
        println!("{}", paint(title, Style::new().bold()));
    });
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    emit("hint", json!({ "message": message }), Level::Normal, |color| {
        if color {
            println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
        } else {
            println!("  hint: {message}");
        }
    });
}

/// Print a block of text, each line indented.
pub fn lines(content: &str) {
    emit("lines", json!({ "content": content }), Level::Normal, |_| {
        for line in content.lines() {
            println!("  {line}");
        }
    });
}

/// Print a complete JSON document for commands with custom JSON output.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

pub fn positive(value: impl Display) -> String {
    paint(value, Style::new().green())
}

pub fn negative(value: impl Display) -> String {
    paint(value, Style::new().red())
}

pub fn highlight(value: impl Display) -> String {
    paint(value, Style::new().cyan())
}

/// Format an amount with thousands separators and two decimals.
#[must_use]
pub fn money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Format a ratio as a percentage with one decimal.
#[must_use]
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

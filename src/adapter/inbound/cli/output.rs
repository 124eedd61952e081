//! Terminal and JSON rendering for command results.
//!
//! In JSON mode each message becomes one `{"type", "payload"}` object on
//! stdout. Quiet mode drops regular messages; warnings and errors still print.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

const APP_NAME: &str = "shardsmith";
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_TICK: Duration = Duration::from_millis(80);
const LABEL_WIDTH: usize = 12;

/// Global flags that shape every message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    /// Count of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }

    fn hides(self, kind: Kind) -> bool {
        kind == Kind::Regular && self.quiet && !self.json
    }
}

/// Whether quiet mode may drop a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Regular,
    Alert,
}

static SETTINGS: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn settings() -> &'static RwLock<OutputConfig> {
    SETTINGS.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    settings()
        .read()
        .map_or_else(|poisoned| *poisoned.into_inner(), |guard| *guard)
}

fn typed(tag: &str, payload: Value) -> Value {
    json!({ "type": tag, "payload": payload })
}

/// Route one message: a typed JSON line, or `render` for humans.
fn emit(tag: &str, kind: Kind, payload: impl FnOnce() -> Value, render: impl FnOnce()) {
    let config = current();
    if config.json {
        println!("{}", typed(tag, payload()));
    } else if !config.hides(kind) {
        render();
    }
}

/// Install the flags parsed from the command line.
pub fn configure(config: OutputConfig) {
    match settings().write() {
        Ok(mut guard) => *guard = config,
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

#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// Banner line with the version.
pub fn header(version: &str) {
    emit(
        "header",
        Kind::Regular,
        || json!({ "app": APP_NAME, "version": version }),
        || println!("{} {}\n", APP_NAME.bold(), version.dimmed()),
    );
}

pub fn section(title: &str) {
    emit(
        "section",
        Kind::Regular,
        || json!({ "title": title }),
        || println!("\n{}", title.bold()),
    );
}

/// A `label  value` row under the current section.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        Kind::Regular,
        || json!({ "label": label, "value": &value }),
        || println!("  {:<LABEL_WIDTH$} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit(
        "success",
        Kind::Regular,
        || json!({ "message": message }),
        || println!("  {} {message}", "✓".green()),
    );
}

pub fn note(message: &str) {
    emit(
        "note",
        Kind::Regular,
        || json!({ "message": message }),
        || println!("  {}", message.dimmed()),
    );
}

pub fn hint(message: &str) {
    emit(
        "hint",
        Kind::Regular,
        || json!({ "message": message }),
        || println!("  {}: {}", "hint".cyan(), message.dimmed()),
    );
}

/// Printed even in quiet mode.
pub fn warning(message: &str) {
    emit(
        "warning",
        Kind::Alert,
        || json!({ "message": message }),
        || println!("  {} {message}", "⚠".yellow()),
    );
}

/// Fatal error line, always on stderr.
pub fn error(message: &str) {
    if current().json {
        eprintln!("{}", typed("error", json!({ "message": message })));
    } else {
        eprintln!("  {} {message}", "×".red());
    }
}

/// Pre-rendered `tabled` output, indented. Omitted in JSON mode.
pub fn table(rendered: &str) {
    let config = current();
    if config.json || config.hides(Kind::Regular) {
        return;
    }
    for line in rendered.lines() {
        println!("  {line}");
    }
}

/// Print a command's result document as a single JSON line.
pub fn json_output(value: Value) {
    println!("{value}");
}

/// Start a spinner. Hidden in JSON and quiet modes.
pub fn spinner(message: &str) -> ProgressBar {
    let config = current();
    let pb = if config.json || config.quiet {
        ProgressBar::hidden()
    } else {
        let style = ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let pb = ProgressBar::new_spinner().with_style(style);
        pb.enable_steady_tick(SPINNER_TICK);
        pb
    };
    pb.set_message(message.to_string());
    pb
}

pub fn spinner_success(pb: &ProgressBar, message: &str) {
    finish_spinner(pb, "spinner_success", Kind::Regular, "✓".green().to_string(), message);
}

pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    finish_spinner(pb, "spinner_fail", Kind::Alert, "×".red().to_string(), message);
}

fn finish_spinner(pb: &ProgressBar, tag: &str, kind: Kind, mark: String, message: &str) {
    let config = current();
    if config.json {
        println!("{}", typed(tag, json!({ "message": message })));
        pb.finish_and_clear();
    } else if config.hides(kind) {
        pb.finish_and_clear();
    } else {
        pb.finish_with_message(format!("{mark} {message}"));
    }
}

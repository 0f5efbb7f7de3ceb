//! Shared CLI output helpers for cdscheck binaries.

use std::time::{Duration, Instant};

use colored::Colorize;

use crate::validation::{Message, Severity};

pub fn banner(subtitle: &str) {
    eprintln!();
    eprintln!("{} {}", "cdscheck".bold().cyan(), subtitle.dimmed());
    eprintln!();
}

pub fn section(title: &str) {
    let bar = "─".repeat(50);
    eprintln!("{} {}", title.bold().blue(), bar.dimmed());
}

pub fn kv(key: &str, value: &str) {
    eprintln!("  {:<20} {}", key.dimmed(), value);
}

pub fn success(msg: &str) {
    eprintln!("  {} {}", "✓".green().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg.yellow());
}

/// One validation message, colored by severity.
pub fn message(context: &str, message: &Message) {
    let severity = match message.severity {
        Severity::Error => message.severity.to_string().red().bold(),
        Severity::Warning => message.severity.to_string().yellow(),
        Severity::Fix => message.severity.to_string().green(),
    };
    let text = message.to_string();
    let detail = text
        .split_once(' ')
        .map_or(text.as_str(), |(_, rest)| rest);
    eprintln!("  {:<8} {} {}", severity, context.dimmed(), detail);
}

/// Formats a duration as HH:MM:SS.d (tenths of a second).
#[must_use]
pub fn format_elapsed(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let tenths = d.subsec_millis() / 100;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{tenths}")
}

pub fn print_summary(start: Instant) {
    eprintln!();
    eprintln!("{}  {}", "Time".dimmed(), format_elapsed(start.elapsed()).bold());
    eprintln!();
}

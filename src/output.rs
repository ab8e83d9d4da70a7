//! Output formatting utilities for the toolbox CLI.
//!
//! Every validation level has a fixed symbol and color so verdicts read the
//! same wherever they are printed.

use colored::{ColoredString, Colorize};

use crate::validation::{ValidationDetails, ValidationLevel};

/// Print a warning message in yellow with a warning sign
pub fn warning(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an info message in blue with an info icon
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Symbol shown next to a verdict.
pub fn level_symbol(level: ValidationLevel) -> &'static str {
    match level {
        ValidationLevel::Success => "✓",
        ValidationLevel::SuccessWithOptions => "✓+",
        ValidationLevel::WarningOptions => "⚠",
        ValidationLevel::WarningSyntax => "!",
        ValidationLevel::ErrorName => "✗",
        ValidationLevel::ErrorManager => "⊘",
        ValidationLevel::ErrorSecurity => "⛨",
        ValidationLevel::ErrorSyntax => "✗",
        ValidationLevel::Loading => "…",
    }
}

/// Applies the level's color to `text`.
pub fn paint(level: ValidationLevel, text: &str) -> ColoredString {
    match level {
        ValidationLevel::Success => text.green(),
        ValidationLevel::SuccessWithOptions => text.bright_green(),
        ValidationLevel::WarningOptions => text.yellow(),
        ValidationLevel::WarningSyntax => text.bright_yellow(),
        ValidationLevel::ErrorName => text.bright_red(),
        ValidationLevel::ErrorManager | ValidationLevel::ErrorSyntax => text.red(),
        ValidationLevel::ErrorSecurity => text.red().bold(),
        ValidationLevel::Loading => text.blue(),
    }
}

/// `<symbol> <level>` painted in the level's color.
pub fn level_badge(level: ValidationLevel) -> String {
    paint(level, &format!("{} {}", level_symbol(level), level)).to_string()
}

/// Renders a verdict as the lines printed by `toolbox validate`.
///
/// Only wording carried by the verdict is printed.
pub fn render_details(details: &ValidationDetails) -> Vec<String> {
    let mut lines = vec![format!("{} {}", level_badge(details.level), details.message)];
    if let Some(suggestion) = &details.suggestion {
        lines.push(format!("  {} {}", "suggestion:".bold(), suggestion));
    }
    lines.push(format!("  {}", details.explanation.dimmed()));
    lines
}

pub fn print_details(details: &ValidationDetails) {
    for line in render_details(details) {
        println!("{line}");
    }
}

/// Format an application name with emphasis
pub fn app_name(name: &str) -> String {
    name.cyan().to_string()
}

/// Format a count with emphasis
pub fn count(n: usize) -> String {
    n.to_string().bold().to_string()
}

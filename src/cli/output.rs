//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::cli::CliError;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print skipped action (yellow label)
pub fn skipped(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.yellow(), msg);
}

/// Print section header (cyan bold) with an underline
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    let msg = msg.to_string();
    println!("{}", msg.cyan().bold());
    println!("{}", "=".repeat(msg.chars().count()).cyan());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Lines of the error banner, without color.
pub fn banner_lines(err: &CliError) -> Vec<String> {
    let msg = format!("ERROR: {err}");
    let width = msg.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let rule = "=".repeat(width);

    let mut lines = vec![rule.clone()];
    lines.extend(msg.lines().map(str::to_string));
    if let Some(annotation) = err.annotation() {
        lines.push(annotation);
    }
    lines.push(rule);
    lines
}

/// Print the error banner to stderr
pub fn error_banner(err: &CliError) {
    for line in banner_lines(err) {
        eprintln!("{}", line.red().bold());
    }
}

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;

static FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let value = match format {
        OutputFormat::Table => 0,
        OutputFormat::Json => 1,
    };
    FORMAT.store(value, Ordering::Relaxed);
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    FORMAT.load(Ordering::Relaxed) == 1
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) {
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
    } else {
        display(item);
    }
}

/// Print a status message; JSON mode wraps it in an object.
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

/// Warnings go to stderr so they never mix with JSON on stdout.
pub fn print_warning(message: &str) {
    eprintln!("{} {message}", "warning:".yellow().bold());
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("Ana", 10), "Ana");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Ingeniería de Software", 10), "Ingenie...");
    }
}

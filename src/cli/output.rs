//! Output formatting utilities for CLI

use anyhow::Result;
use serde::Serialize;

use crate::view::Fact;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print `value` as pretty JSON, or through `text_formatter` in text mode
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, text_formatter: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let rendered = match format {
        OutputFormat::Text => text_formatter(value),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
    };
    println!("{}", rendered);
    Ok(())
}

/// Print a success message (suppressed in quiet mode)
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Print an error message (never suppressed)
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}

/// Format facts as aligned "Label: value" lines
pub fn format_facts(facts: &[Fact], indent: usize) -> String {
    let width = facts.iter().map(|f| f.label.len()).max().unwrap_or(0);
    facts
        .iter()
        .map(|f| format!("{:indent$}{:<width$}  {}", "", format!("{}:", f.label), f.value, width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with specialized
//! support for validation results and flattened path listings.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{self, Write};
use tally_core::{DataSet, ValidationResult};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation result, optionally quoting the offending values
    fn format_validation_result(&self, result: &ValidationResult, body: Option<&DataSet<'_>>) -> Result<String>;

    /// Format path/value entries (a flattened registry or a match listing)
    fn format_entries(&self, entries: &[(&str, &Value)], paths_only: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_validation_result(&self, result: &ValidationResult, body: Option<&DataSet<'_>>) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_result_human(result, body)),
            _ => self.format(result),
        }
    }

    fn format_entries(&self, entries: &[(&str, &Value)], paths_only: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_entries_human(entries, paths_only)),
            _ if paths_only => {
                let paths: Vec<&str> = entries.iter().map(|(path, _)| *path).collect();
                self.format(&paths)
            }
            _ => {
                let map: BTreeMap<&str, &Value> = entries.iter().copied().collect();
                self.format(&map)
            }
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write debug information if verbose mode is enabled
    pub fn debug(&mut self, message: &str) -> Result<()> {
        if self.verbose == 0 || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "DEBUG:".dimmed(), message.dimmed()))
        } else {
            self.writeln(&format!("DEBUG: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let mut value_json = serde_json::to_value(value)?;
        redaction::redact_json_value(&mut value_json);
        trace!("Outputting data: {}", value_json);

        let formatted = self.format.format(value)?;
        self.emit(&formatted)
    }

    /// Write a validation result
    pub fn validation_result(&mut self, result: &ValidationResult, body: Option<&DataSet<'_>>) -> Result<()> {
        let mut formatted = self.format.format_validation_result(result, body)?;
        if self.is_human() && self.use_color {
            formatted = colorize_validation_human(&formatted);
        }
        self.emit(&formatted)
    }

    /// Write path/value entries
    pub fn entries(&mut self, entries: &[(&str, &Value)], paths_only: bool) -> Result<()> {
        let formatted = self.format.format_entries(entries, paths_only)?;
        self.emit(&formatted)
    }

    fn emit(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

/// Format a validation result for human reading, one block per path
fn format_validation_result_human(result: &ValidationResult, body: Option<&DataSet<'_>>) -> String {
    let mut output = String::new();

    if result.is_valid() {
        output.push_str("✓ No validation errors\n");
        return output;
    }

    output.push_str(&format!(
        "✗ {} validation error(s) at {} path(s)\n",
        result.error_count(),
        result.path_count()
    ));

    for path in result.paths() {
        output.push('\n');
        match body.and_then(|set| set.get(path)) {
            Some(value) => output.push_str(&format!("{} = {}\n", path, format_value_compact(value))),
            None => output.push_str(&format!("{}\n", path)),
        }
        for error in result.errors_for(path) {
            output.push_str(&format!("  • {} [{}]\n", error.message, error.rule));
        }
    }

    output
}

fn colorize_validation_human(formatted: &str) -> String {
    formatted
        .lines()
        .map(|line| {
            if line.starts_with('✓') {
                line.green().to_string()
            } else if line.starts_with('✗') {
                line.red().bold().to_string()
            } else if line.starts_with("  •") {
                line.to_string()
            } else {
                line.bold().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format path/value entries for human reading
fn format_entries_human(entries: &[(&str, &Value)], paths_only: bool) -> String {
    if entries.is_empty() {
        return "(no paths)\n".to_string();
    }

    let width = entries.iter().map(|(path, _)| path.len()).max().unwrap_or(0);
    let mut output = String::new();
    for (path, value) in entries {
        if paths_only {
            output.push_str(&format!("{}\n", path));
        } else {
            output.push_str(&format!("{:width$}  {}\n", path, format_value_compact(value), width = width));
        }
    }
    output
}

/// Format a JSON value in a compact, human-readable way
fn format_value_compact(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            if arr.len() <= 3 {
                format!(
                    "[{}]",
                    arr.iter().map(format_value_compact).collect::<Vec<_>>().join(", ")
                )
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => {
            if obj.len() <= 2 {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, format_value_compact(v)))
                    .collect();
                format!("{{{}}}", items.join(", "))
            } else {
                format!("{{{} fields}}", obj.len())
            }
        }
    }
}

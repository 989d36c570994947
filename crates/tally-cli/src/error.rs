//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Rule specification error from tally-core
    #[error("Specification error: {0}")]
    Core(#[from] tally_core::Error),

    /// Rule table error from tally-schemas
    #[error("{0}")]
    Schema(#[from] tally_schemas::SchemaError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {}", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// The request body failed validation
    #[error("Validation failed with {errors} error(s) at {paths} path(s)")]
    ValidationFailed { errors: usize, paths: usize },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// Ad-hoc failure carrying its own context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationFailed { .. } => 1,
            Self::Io(_) => 2,
            Self::Core(_) => 3,
            Self::Schema(_) => 4,
            Self::FileNotFound { .. } => 5,
            Self::InvalidFormat { .. } => 6,
            Self::Config(_) => 7,
            Self::InvalidArgs(_) => 8,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other(_) => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let message = match error {
        // Print the whole context chain
        Error::Other(inner) => format!("{:#}", inner),
        _ => error.to_string(),
    };

    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), message)
    } else {
        format!("Error: {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_codes_are_distinct_for_validation() {
        let failed = Error::ValidationFailed { errors: 2, paths: 1 };
        assert_eq!(failed.exit_code(), 1);
        assert_ne!(Error::config("x").exit_code(), failed.exit_code());
        assert_ne!(
            Error::FileNotFound { path: PathBuf::from("a.json") }.exit_code(),
            failed.exit_code()
        );
    }

    #[test]
    fn test_should_show_help() {
        assert!(Error::invalid_args("no table").should_show_help());
        assert!(!Error::config("bad").should_show_help());
    }

    #[test]
    fn test_format_error_without_color() {
        let error = Error::ValidationFailed { errors: 3, paths: 2 };
        assert_eq!(
            format_error(&error, false),
            "Error: Validation failed with 3 error(s) at 2 path(s)"
        );
    }

    #[test]
    fn test_format_error_prints_context_chain() {
        let inner: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let error: Error = inner.context("writing .tally.yaml").unwrap_err().into();
        let text = format_error(&error, false);
        assert!(text.contains("writing .tally.yaml"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn test_schema_errors_convert() {
        let error: Error = tally_schemas::SchemaError::invalid_table("rules.yaml", "not a map").into();
        assert_eq!(error.exit_code(), 4);
    }
}

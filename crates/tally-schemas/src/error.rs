//! Error types for rule-table loading and lookup
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while loading, compiling or looking up rule tables
#[derive(Error, Debug)]
pub enum SchemaError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("Failed to parse TOML file '{path}': {source}")]
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, .json or .toml")]
    UnsupportedFormat { path: PathBuf },

    /// The file parsed but does not have the shape of a rule-table file
    #[error("Invalid rule table file '{path}': {reason}")]
    InvalidTable { path: PathBuf, reason: String },

    /// A table's rules or patterns are broken
    #[error("Invalid rule table '{table}': {source}")]
    Specification {
        table: String,
        source: tally_core::Error,
    },

    /// No table is registered under the requested name
    #[error("Unknown rule table '{name}'. Available tables: {}", available.join(", "))]
    UnknownTable { name: String, available: Vec<String> },
}

impl SchemaError {
    /// Create an I/O error with path context
    pub fn io_error(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source: error,
        }
    }

    /// Create an invalid table error
    pub fn invalid_table(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a specification error with the table it came from
    pub fn specification(table: impl Into<String>, error: tally_core::Error) -> Self {
        Self::Specification {
            table: table.into(),
            source: error,
        }
    }

    /// Whether the error comes from reading or parsing a file
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::IoError { .. }
                | Self::YamlParseError { .. }
                | Self::JsonParseError { .. }
                | Self::TomlParseError { .. }
                | Self::UnsupportedFormat { .. }
                | Self::InvalidTable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_table_lists_available() {
        let err = SchemaError::UnknownTable {
            name: "nope".to_string(),
            available: vec!["login".to_string(), "init".to_string()],
        };
        assert_eq!(err.to_string(), "Unknown rule table 'nope'. Available tables: login, init");
        assert!(!err.is_file_error());
    }

    #[test]
    fn test_specification_error_keeps_source() {
        let err = SchemaError::specification(
            "login",
            tally_core::Error::UnknownRule {
                name: "yeet".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Invalid rule table 'login': Unknown rule 'yeet'");
        assert!(std::error::Error::source(&err).is_some());
    }
}

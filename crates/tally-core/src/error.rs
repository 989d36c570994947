//! Error types for the Tally core library
//!
//! Only *specification* errors live here: an unknown rule name, a malformed
//! argument, a pattern a rule cannot work with. These indicate a broken
//! endpoint definition and are raised when a rule specification is built.
//! Problems with the validated data are never errors in this sense; they are
//! collected into a [`ValidationResult`](crate::ValidationResult).
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type alias for specification building
pub type Result<T> = std::result::Result<T, Error>;

/// Specification errors raised while building a rule specification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rule name in a declarative table is not known
    #[error("Unknown rule '{name}'")]
    UnknownRule { name: String },

    /// A rule that needs an argument was declared without one
    #[error("The '{rule}' rule requires an argument: {expected}")]
    MissingArgument { rule: String, expected: String },

    /// A rule argument could not be interpreted
    #[error("Invalid argument '{argument}' for rule '{rule}': {message}")]
    InvalidArgument {
        rule: String,
        argument: String,
        message: String,
    },

    /// A key pattern is malformed
    #[error("Invalid key pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A rule cannot be attached to the given pattern
    #[error("Rule '{rule}' cannot be applied to pattern '{pattern}': {message}")]
    UnsupportedPattern {
        rule: String,
        pattern: String,
        message: String,
    },

    /// The same pattern was declared twice in one specification
    #[error("Key pattern '{pattern}' is declared more than once")]
    DuplicatePattern { pattern: String },
}

impl Error {
    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(
        rule: impl Into<String>,
        argument: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            rule: rule.into(),
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a missing argument error
    pub fn missing_argument(rule: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::MissingArgument {
            rule: rule.into(),
            expected: expected.into(),
        }
    }

    /// The pattern this error refers to, if any
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::InvalidPattern { pattern, .. }
            | Self::UnsupportedPattern { pattern, .. }
            | Self::DuplicatePattern { pattern } => Some(pattern),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::UnknownRule {
            name: "bogus".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown rule 'bogus'");

        let error = Error::missing_argument("min", "a non-negative integer");
        assert_eq!(
            error.to_string(),
            "The 'min' rule requires an argument: a non-negative integer"
        );
    }

    #[test]
    fn test_error_pattern_accessor() {
        assert_eq!(
            Error::invalid_pattern("a..b", "empty segment").pattern(),
            Some("a..b")
        );
        assert_eq!(
            Error::invalid_argument("min", "x", "not a number").pattern(),
            None
        );
    }
}

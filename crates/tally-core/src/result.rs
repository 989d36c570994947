//! Validation errors and the per-call result collection
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A single data error, addressed at a concrete path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path the error refers to (a pattern for aggregate rules)
    pub path: String,
    /// Human-readable error message
    pub message: String,
    /// Name of the rule that produced the error
    pub rule: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, M, R>(path: P, message: M, rule: R) -> Self
    where
        P: Into<String>,
        M: Into<String>,
        R: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.rule)
    }
}

/// Errors produced by one validation call, keyed by path.
///
/// Paths iterate in lexicographic order; errors for one path keep the order
/// in which rules emitted them. Errors are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<String, Vec<ValidationError>>,
}

impl ValidationResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error under its path
    pub fn add(&mut self, error: ValidationError) {
        self.errors.entry(error.path.clone()).or_default().push(error);
    }

    /// Errors recorded for `path`
    pub fn errors_for(&self, path: &str) -> &[ValidationError] {
        self.errors.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Messages recorded for `path`
    pub fn messages_for(&self, path: &str) -> Vec<&str> {
        self.errors_for(path)
            .iter()
            .map(|e| e.message.as_str())
            .collect()
    }

    /// All errors, grouped by path in path order
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values().flatten()
    }

    /// Paths that have at least one error
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Total number of errors
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Number of distinct paths with errors
    pub fn path_count(&self) -> usize {
        self.errors.len()
    }

    /// Whether no error was recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Path → messages map, the shape returned to API clients
    pub fn error_map(&self) -> BTreeMap<String, Vec<String>> {
        self.errors
            .iter()
            .map(|(path, errors)| {
                let messages = errors.iter().map(|e| e.message.clone()).collect();
                (path.clone(), messages)
            })
            .collect()
    }

    /// Convert to result - Ok if valid, Err carrying the errors otherwise
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Extend<ValidationError> for ValidationResult {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        for error in iter {
            self.add(error);
        }
    }
}

impl FromIterator<ValidationError> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (path, errors) in &self.errors {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            map.serialize_entry(path, &messages)?;
        }
        map.end()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "No validation errors");
        }
        write!(f, "{} validation error(s):", self.error_count())?;
        for error in self.errors() {
            write!(f, "\n  - {}: {}", error.path, error.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ValidationResult {
        vec![
            ValidationError::new("b", "b is required.", "required"),
            ValidationError::new("a", "a must be a string.", "string"),
            ValidationError::new("a", "a must have at least 1 character(s).", "min"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_accessors() {
        let result = sample();
        assert!(!result.is_valid());
        assert_eq!(result.error_count(), 3);
        assert_eq!(result.path_count(), 2);
        assert_eq!(result.errors_for("a").len(), 2);
        assert_eq!(result.messages_for("b"), vec!["b is required."]);
        assert!(result.errors_for("c").is_empty());
        assert_eq!(result.paths().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_as_error_map() {
        let result = sample();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "a": ["a must be a string.", "a must have at least 1 character(s)."],
                "b": ["b is required."]
            })
        );
        assert_eq!(serde_json::to_value(result.error_map()).unwrap(), value);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationResult::new().into_result().is_ok());
        assert_eq!(sample().into_result().unwrap_err().error_count(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(ValidationResult::new().to_string(), "No validation errors");
        let text = sample().to_string();
        assert!(text.starts_with("3 validation error(s):"));
        assert!(text.contains("b: b is required."));
    }
}

//! Calendar format checks backed by chrono's strftime syntax
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{reject_each, Rule, RuleContext};
use crate::error::{Error, Result};
use crate::result::ValidationError;
use chrono::format::{self, Item, ParseErrorKind, Parsed, StrftimeItems};
use serde_json::Value;

/// The value must be a string matching a strftime format exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    format: String,
}

impl DateFormat {
    pub const NAME: &'static str = "date_format";

    /// Create the rule, rejecting empty or malformed formats
    pub fn new(format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        if format.is_empty() {
            return Err(Error::missing_argument(Self::NAME, "a date format such as %Y-%m-%d"));
        }
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::invalid_argument(
                Self::NAME,
                format,
                "not a valid strftime format",
            ));
        }
        Ok(Self { format })
    }

    /// The format string
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Whether `input` parses under the format with nothing left over and
    /// describes a real calendar date/time
    pub fn parses(&self, input: &str) -> bool {
        let mut parsed = Parsed::new();
        if format::parse(&mut parsed, input, StrftimeItems::new(&self.format)).is_err() {
            return false;
        }
        // Formats may describe only a date or only a time; missing fields are
        // fine, contradictory or out-of-range ones are not.
        let consistent = |kind: ParseErrorKind| kind == ParseErrorKind::NotEnough;
        let date_ok = parsed.to_naive_date().map_or_else(|e| consistent(e.kind()), |_| true);
        let time_ok = parsed.to_naive_time().map_or_else(|e| consistent(e.kind()), |_| true);
        date_ok && time_ok
    }
}

impl Rule for DateFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        reject_each(
            ctx,
            Self::NAME,
            |value| matches!(value, Value::String(s) if self.parses(s)),
            |path| format!("{} must be a date of format '{}'.", path, self.format),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date() {
        let rule = DateFormat::new("%Y-%m-%d").unwrap();
        assert!(rule.parses("2021-01-01"));
        assert!(!rule.parses("yee!"));
        assert!(!rule.parses("2021-02-30"));
        assert!(!rule.parses("2021-01-01 06:30:30"));
        assert!(!rule.parses("2021-01"));
    }

    #[test]
    fn test_date_with_time() {
        let rule = DateFormat::new("%Y-%m-%d %H:%M:%S").unwrap();
        assert!(rule.parses("2021-01-01 06:30:30"));
        assert!(!rule.parses("2021-01-01"));
        assert!(!rule.parses("2021-01-01 25:30:30"));
    }

    #[test]
    fn test_time_only() {
        let rule = DateFormat::new("%H:%M").unwrap();
        assert!(rule.parses("06:30"));
        assert!(!rule.parses("6h30"));
    }

    #[test]
    fn test_invalid_formats() {
        assert!(matches!(DateFormat::new(""), Err(Error::MissingArgument { .. })));
        assert!(matches!(DateFormat::new("%Q"), Err(Error::InvalidArgument { .. })));
    }
}

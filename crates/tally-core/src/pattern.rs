//! Dotted key patterns with single-segment wildcards
//!
//! A pattern such as `transactions.*.amount` is a sequence of segments joined
//! by `.`, where a `*` segment matches exactly one path segment: never zero,
//! never several. Patterns are compiled once into an anchored regular
//! expression and then matched against the paths of a [`DataSet`].
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::dataset::{DataSet, SEPARATOR};
use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// The wildcard segment token
pub const WILDCARD: &str = "*";

/// Regex fragment matching one path segment
const SEGMENT_REGEX: &str = r"[^.]+";

/// A compiled key pattern
#[derive(Debug, Clone)]
pub struct KeyPattern {
    raw: String,
    regex: Regex,
    wildcard: bool,
}

impl KeyPattern {
    /// Compile a dotted pattern
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::invalid_pattern(pattern, "pattern cannot be empty"));
        }

        let mut fragments = Vec::new();
        let mut wildcard = false;
        for segment in pattern.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(Error::invalid_pattern(pattern, "pattern contains an empty segment"));
            }
            if segment == WILDCARD {
                wildcard = true;
                fragments.push(SEGMENT_REGEX.to_string());
            } else {
                fragments.push(regex::escape(segment));
            }
        }

        let source = format!("^{}$", fragments.join(r"\."));
        let regex = Regex::new(&source)
            .map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self {
            raw: pattern.to_string(),
            regex,
            wildcard,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether any segment is a wildcard
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Whether the final segment is a wildcard
    pub fn ends_with_wildcard(&self) -> bool {
        self.trailing_segment() == WILDCARD
    }

    /// The pattern's segments in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split(SEPARATOR)
    }

    /// The final segment, e.g. `amount` for `transactions.*.amount`
    pub fn trailing_segment(&self) -> &str {
        match self.raw.rfind(SEPARATOR) {
            Some(index) => &self.raw[index + 1..],
            None => &self.raw,
        }
    }

    /// The pattern with its final segment removed.
    ///
    /// `transactions.*.amount` yields `transactions.*`; a single-segment
    /// pattern has no parent and yields `None` (its parent is the root).
    pub fn parent(&self) -> Option<KeyPattern> {
        let index = self.raw.rfind(SEPARATOR)?;
        let raw = &self.raw[..index];
        // Every prefix of a valid pattern is itself valid.
        KeyPattern::compile(raw).ok()
    }

    /// Whether a concrete path matches this pattern
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Paths in `dataset` matching this pattern, in lexicographic order
    pub fn matching_paths<'s>(&self, dataset: &'s DataSet<'_>) -> Vec<&'s str> {
        self.matching_entries(dataset)
            .into_iter()
            .map(|(path, _)| path)
            .collect()
    }

    /// Entries in `dataset` matching this pattern, in lexicographic path order
    pub fn matching_entries<'s>(&self, dataset: &'s DataSet<'_>) -> Vec<(&'s str, &'s Value)> {
        if !self.wildcard {
            // A literal pattern can match at most its own path.
            return dataset.entry(&self.raw).into_iter().collect();
        }

        // Data set entries iterate in lexicographic order already.
        dataset
            .entries()
            .filter(|(path, _)| self.regex.is_match(path))
            .collect()
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for KeyPattern {}

impl std::str::FromStr for KeyPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

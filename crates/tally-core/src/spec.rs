//! Rule specifications: key patterns mapped to ordered rule chains
//!
//! A [`RuleSpecification`] is the compiled form of an endpoint's rule table.
//! Building one resolves every rule name, compiles every pattern and lets
//! every rule vet the pattern it is attached to, so all specification errors
//! surface here instead of during validation.
//!
//! ```rust
//! use tally_core::{RuleSpecification, rules::Nullable};
//!
//! let spec = RuleSpecification::builder()
//!     .parse("transactions.*.amount", "required|integer|sum_equals:0")
//!     .parse("description", "string")
//!     .rule("description", Nullable)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(spec.len(), 2);
//! // `nullable` is moved to the front of its chain
//! assert_eq!(spec.get("description").unwrap().rule_names(), vec!["nullable", "string"]);
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::pattern::KeyPattern;
use crate::rules::{parse_rule_list, Rule};
use std::collections::HashSet;
use tracing::debug;

/// One pattern and the rule chain evaluated against it
#[derive(Debug)]
pub struct PatternRules {
    pattern: KeyPattern,
    rules: Vec<Box<dyn Rule>>,
}

impl PatternRules {
    /// The compiled pattern
    pub fn pattern(&self) -> &KeyPattern {
        &self.pattern
    }

    /// The chain in evaluation order
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Canonical names of the chain's rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

/// Compiled rule table, patterns kept in declaration order
#[derive(Debug, Default)]
pub struct RuleSpecification {
    entries: Vec<PatternRules>,
}

impl RuleSpecification {
    /// Start building a specification
    pub fn builder() -> RuleSpecificationBuilder {
        RuleSpecificationBuilder::new()
    }

    /// Build a specification from `(pattern, "rule|rule:arg")` pairs.
    ///
    /// Declaring the same pattern twice is an error.
    pub fn from_table<I, P, R>(table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut builder = Self::builder();
        for (pattern, list) in table {
            let pattern = pattern.as_ref();
            if !seen.insert(pattern.to_string()) {
                return Err(Error::DuplicatePattern {
                    pattern: pattern.to_string(),
                });
            }
            builder = builder.parse(pattern, list.as_ref());
        }
        builder.build()
    }

    /// Entries in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, PatternRules> {
        self.entries.iter()
    }

    /// The entry declared for `pattern`
    pub fn get(&self, pattern: &str) -> Option<&PatternRules> {
        self.entries.iter().find(|entry| entry.pattern.as_str() == pattern)
    }

    /// Declared patterns in order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.pattern.as_str())
    }

    /// Number of declared patterns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSpecification {
    type Item = &'a PatternRules;
    type IntoIter = std::slice::Iter<'a, PatternRules>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Fluent builder for [`RuleSpecification`].
///
/// Every method appends to the chain of the named pattern, declaring the
/// pattern on first use. The first error encountered is kept and returned by
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RuleSpecificationBuilder {
    entries: Vec<(String, Vec<Box<dyn Rule>>)>,
    error: Option<Error>,
}

impl RuleSpecificationBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rules of a `|`-delimited list such as `required|min:1`
    pub fn parse(mut self, pattern: &str, list: &str) -> Self {
        match parse_rule_list(list) {
            Ok(rules) => self.chain(pattern).extend(rules),
            Err(e) => self.fail(e),
        }
        self
    }

    /// Append one rule instance
    pub fn rule<R: Rule + 'static>(mut self, pattern: &str, rule: R) -> Self {
        self.chain(pattern).push(Box::new(rule));
        self
    }

    /// Append several boxed rules
    pub fn rules<I>(mut self, pattern: &str, rules: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Rule>>,
    {
        self.chain(pattern).extend(rules);
        self
    }

    /// Compile patterns, vet them against their rules and order each chain
    pub fn build(self) -> Result<RuleSpecification> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut entries = Vec::with_capacity(self.entries.len());
        for (raw, mut rules) in self.entries {
            let pattern = KeyPattern::compile(&raw)?;
            for rule in &rules {
                rule.check_pattern(&pattern)?;
            }
            // Stable: rules of equal priority keep their declared order.
            rules.sort_by_key(|rule| rule.priority());
            entries.push(PatternRules { pattern, rules });
        }

        debug!(patterns = entries.len(), "built rule specification");
        Ok(RuleSpecification { entries })
    }

    fn chain(&mut self, pattern: &str) -> &mut Vec<Box<dyn Rule>> {
        let index = match self.entries.iter().position(|(raw, _)| raw == pattern) {
            Some(index) => index,
            None => {
                self.entries.push((pattern.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    fn fail(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{IsInteger, Nullable, Required};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_table_keeps_declaration_order() {
        let spec = RuleSpecification::from_table([
            ("zeta", "string"),
            ("alpha", "required"),
            ("mid.*.x", "integer|null"),
        ])
        .unwrap();
        assert_eq!(spec.patterns().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid.*.x"]);
    }

    #[test]
    fn test_nullable_moves_first_stably() {
        let spec = RuleSpecification::from_table([("a", "required|integer|null|min:1")]).unwrap();
        assert_eq!(
            spec.get("a").unwrap().rule_names(),
            vec!["nullable", "required", "integer", "min"]
        );
    }

    #[test]
    fn test_builder_appends_to_existing_chain() {
        let spec = RuleSpecification::builder()
            .rule("a", IsInteger)
            .parse("b", "string")
            .rule("a", Nullable)
            .rules("a", vec![Box::new(Required) as Box<dyn Rule>])
            .build()
            .unwrap();
        assert_eq!(spec.len(), 2);
        assert_eq!(
            spec.get("a").unwrap().rule_names(),
            vec!["nullable", "integer", "required"]
        );
    }

    #[test]
    fn test_duplicate_pattern_in_table() {
        let err = RuleSpecification::from_table([("a", "string"), ("a", "required")]).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicatePattern {
                pattern: "a".to_string()
            }
        );
    }

    #[test]
    fn test_errors_surface_at_build_time() {
        assert!(matches!(
            RuleSpecification::from_table([("a", "required|yeet")]),
            Err(Error::UnknownRule { .. })
        ));
        assert!(matches!(
            RuleSpecification::from_table([("a..b", "required")]),
            Err(Error::InvalidPattern { .. })
        ));
        assert!(matches!(
            RuleSpecification::from_table([("rows.*", "required")]),
            Err(Error::UnsupportedPattern { .. })
        ));
        assert!(matches!(
            RuleSpecification::from_table([("a", "min")]),
            Err(Error::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_first_error_wins() {
        let err = RuleSpecification::builder()
            .parse("a", "yeet")
            .parse("b", "min:x")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownRule {
                name: "yeet".to_string()
            }
        );
    }

    #[test]
    fn test_empty_chain_is_allowed() {
        let spec = RuleSpecification::from_table([("a", "")]).unwrap();
        assert!(spec.get("a").unwrap().rules().is_empty());
    }
}

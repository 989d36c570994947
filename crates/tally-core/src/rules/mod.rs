//! Validation rules
//!
//! A rule inspects the values a key pattern resolves to and reports data
//! errors. Rules are evaluated in chains, one chain per pattern; a rule may
//! additionally *cancel* individual matched paths, which suppresses every
//! later rule of the same chain for those paths only. This is how
//! [`Nullable`] lets `null` through a chain like `integer|nullable`.
//!
//! The built-in set covers presence, type and format checks, size limits and
//! the aggregate [`SumEquals`] used for ledger balancing. Custom rules can be
//! written by implementing [`Rule`].
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod date_format;
pub mod nullable;
pub mod parser;
pub mod required;
pub mod size;
pub mod sum;
pub mod types;

pub use date_format::DateFormat;
pub use nullable::Nullable;
pub use parser::{parse_rule, parse_rule_list, RuleToken};
pub use required::Required;
pub use size::{MaxSize, MinSize};
pub use sum::SumEquals;
pub use types::{IsArray, IsBoolean, IsInteger, IsNumber, IsString};

use crate::dataset::DataSet;
use crate::error::Result;
use crate::pattern::KeyPattern;
use crate::result::ValidationError;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Evaluation priority within one pattern's chain.
///
/// Chains are stably sorted by priority when a specification is built, so
/// cancelling rules always run before the rules they are meant to suppress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RulePriority {
    /// Rules that cancel matched paths (e.g. nullable)
    Cancelling,
    /// Everything else
    Normal,
}

/// A validation rule
pub trait Rule: fmt::Debug + Send + Sync {
    /// Canonical rule name, used in error records
    fn name(&self) -> &str;

    /// Position of the rule when its chain is reordered
    fn priority(&self) -> RulePriority {
        RulePriority::Normal
    }

    /// Reject patterns this rule cannot be evaluated against
    fn check_pattern(&self, _pattern: &KeyPattern) -> Result<()> {
        Ok(())
    }

    /// Evaluate the rule, returning every data error found
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError>;

    /// Whether the matched `path` should be skipped by the rest of the chain
    fn cancels(&self, _path: &str, _value: &Value) -> bool {
        false
    }
}

/// Everything a rule sees while being evaluated
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    dataset: &'a DataSet<'a>,
    pattern: &'a KeyPattern,
    matches: &'a [(&'a str, &'a Value)],
    cancelled: &'a HashSet<String>,
}

impl<'a> RuleContext<'a> {
    /// Create a context; `matches` must be the pattern's matches in `dataset`
    pub fn new(
        dataset: &'a DataSet<'a>,
        pattern: &'a KeyPattern,
        matches: &'a [(&'a str, &'a Value)],
        cancelled: &'a HashSet<String>,
    ) -> Self {
        Self {
            dataset,
            pattern,
            matches,
            cancelled,
        }
    }

    /// The flattened data being validated
    pub fn dataset(&self) -> &'a DataSet<'a> {
        self.dataset
    }

    /// The pattern the chain is attached to
    pub fn pattern(&self) -> &'a KeyPattern {
        self.pattern
    }

    /// Every path matched by the pattern, cancelled ones included
    pub fn matches(&self) -> &'a [(&'a str, &'a Value)] {
        self.matches
    }

    /// Whether an earlier rule in the chain cancelled `path`
    pub fn is_cancelled(&self, path: &str) -> bool {
        self.cancelled.contains(path)
    }

    /// Matched paths that are still subject to validation
    pub fn candidates(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
        self.matches
            .iter()
            .copied()
            .filter(move |&(path, _)| !self.is_cancelled(path))
    }
}

/// Evaluate a single rule against `pattern` with nothing cancelled
pub fn evaluate(rule: &dyn Rule, dataset: &DataSet<'_>, pattern: &KeyPattern) -> Vec<ValidationError> {
    let matches = pattern.matching_entries(dataset);
    let cancelled = HashSet::new();
    let ctx = RuleContext::new(dataset, pattern, &matches, &cancelled);
    rule.evaluate(&ctx)
}

/// Emit one error per candidate whose value fails `accepts`
pub(crate) fn reject_each<A, M>(
    ctx: &RuleContext<'_>,
    rule: &str,
    accepts: A,
    message: M,
) -> Vec<ValidationError>
where
    A: Fn(&Value) -> bool,
    M: Fn(&str) -> String,
{
    ctx.candidates()
        .filter(|&(_, value)| !accepts(value))
        .map(|(path, _)| ValidationError::new(path, message(path), rule))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct RejectEverything;

    impl Rule for RejectEverything {
        fn name(&self) -> &str {
            "reject"
        }

        fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
            reject_each(ctx, self.name(), |_| false, |path| format!("{} rejected", path))
        }
    }

    #[test]
    fn test_candidates_skip_cancelled_paths() {
        let data = json!({"a": [1, 2, 3]});
        let set = DataSet::new(&data);
        let pattern = KeyPattern::compile("a.*").unwrap();
        let matches = pattern.matching_entries(&set);
        let cancelled: HashSet<String> = ["a.1".to_string()].into_iter().collect();
        let ctx = RuleContext::new(&set, &pattern, &matches, &cancelled);

        let errors = RejectEverything.evaluate(&ctx);
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a.0", "a.2"]);
        assert_eq!(ctx.matches().len(), 3);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(RulePriority::Cancelling < RulePriority::Normal);
    }
}

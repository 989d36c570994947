//! Presence checks with wildcard-parent correlation
//!
//! For a literal pattern, `required` fails when nothing non-null lives at the
//! pattern's path. For a wildcard pattern such as `transactions.*.account`,
//! every container matched by the parent pattern (`transactions.*`) must hold
//! the trailing field; each offender yields its own error at a concrete path
//! (`transactions.1.account`). When the parent pattern matches nothing at all
//! a single error is reported at the bare trailing segment.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{Rule, RuleContext};
use crate::dataset::{self, ROOT_KEY};
use crate::error::{Error, Result};
use crate::pattern::KeyPattern;
use crate::result::ValidationError;
use std::collections::HashSet;

/// The value must be present and non-null
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Required;

impl Required {
    pub const NAME: &'static str = "required";

    fn error(path: &str) -> ValidationError {
        ValidationError::new(path, format!("{} is required.", path), Self::NAME)
    }
}

impl Rule for Required {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn check_pattern(&self, pattern: &KeyPattern) -> Result<()> {
        if pattern.ends_with_wildcard() {
            return Err(Error::UnsupportedPattern {
                rule: Self::NAME.to_string(),
                pattern: pattern.as_str().to_string(),
                message: "the final segment must name the required field".to_string(),
            });
        }
        Ok(())
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        let pattern = ctx.pattern();
        let present: HashSet<&str> = ctx
            .matches()
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(path, _)| *path)
            .collect();

        if !pattern.is_wildcard() {
            let path = pattern.as_str();
            if present.contains(path) || ctx.is_cancelled(path) {
                return Vec::new();
            }
            return vec![Self::error(path)];
        }

        let field = pattern.trailing_segment();
        let mut parents = pattern
            .parent()
            .map(|parent| parent.matching_paths(ctx.dataset()))
            .unwrap_or_default();
        if parents.is_empty() {
            parents.push(ROOT_KEY);
        }

        parents
            .into_iter()
            .map(|parent| dataset::join(Some(parent).filter(|p| *p != ROOT_KEY), field))
            .filter(|path| !present.contains(path.as_str()) && !ctx.is_cancelled(path))
            .map(|path| Self::error(&path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSet;
    use crate::rules::evaluate;
    use serde_json::{json, Value};

    fn run(data: &Value, pattern: &str) -> Vec<ValidationError> {
        let set = DataSet::new(data);
        evaluate(&Required, &set, &KeyPattern::compile(pattern).unwrap())
    }

    fn paths(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_missing_key_at_top_level() {
        let errors = run(&json!({"a": 1}), "b");
        assert_eq!(paths(&errors), vec!["b"]);
        assert_eq!(errors[0].message, "b is required.");
    }

    #[test]
    fn test_key_present_at_top_level() {
        assert!(run(&json!({"a": 1}), "a").is_empty());
    }

    #[test]
    fn test_null_counts_as_missing() {
        assert_eq!(paths(&run(&json!({"a": null}), "a")), vec!["a"]);
    }

    #[test]
    fn test_falsy_values_are_present() {
        let data = json!({"a": 0, "b": false, "c": "", "d": []});
        for key in ["a", "b", "c", "d"] {
            assert!(run(&data, key).is_empty(), "{} should be present", key);
        }
    }

    #[test]
    fn test_wildcard_at_root_reports_every_parent() {
        let errors = run(&json!({"a": 1, "b": 2}), "*.a");
        assert_eq!(paths(&errors), vec!["a.a", "b.a"]);
    }

    #[test]
    fn test_wildcard_only_reports_missing_children() {
        let errors = run(&json!({"a": 1, "b": {"a": 2}}), "*.a");
        assert_eq!(paths(&errors), vec!["a.a"]);
    }

    #[test]
    fn test_parent_that_is_not_a_map() {
        let errors = run(&json!([[]]), "*.a");
        assert_eq!(paths(&errors), vec!["0.a"]);
    }

    #[test]
    fn test_error_includes_whole_parent_path() {
        let errors = run(&json!({"a": {"b": []}}), "a.*.yee");
        assert_eq!(paths(&errors), vec!["a.b.yee"]);
    }

    #[test]
    fn test_per_row_errors() {
        let data = json!({
            "transactions": [
                {"account": 1930, "amount": 100},
                {"amount": -100},
                {"account": null, "amount": 0}
            ]
        });
        let errors = run(&data, "transactions.*.account");
        assert_eq!(
            paths(&errors),
            vec!["transactions.1.account", "transactions.2.account"]
        );
        assert_eq!(errors[0].message, "transactions.1.account is required.");
    }

    #[test]
    fn test_wildcard_without_parents_reports_trailing_segment() {
        let errors = run(&json!({"transactions": 5}), "transactions.*.amount");
        assert_eq!(paths(&errors), vec!["amount"]);
    }

    #[test]
    fn test_cancelled_paths_are_not_reported() {
        let data = json!({"a": null});
        let set = DataSet::new(&data);
        let pattern = KeyPattern::compile("a").unwrap();
        let matches = pattern.matching_entries(&set);
        let cancelled: HashSet<String> = ["a".to_string()].into_iter().collect();
        let ctx = RuleContext::new(&set, &pattern, &matches, &cancelled);

        assert!(Required.evaluate(&ctx).is_empty());
    }

    #[test]
    fn test_rejects_trailing_wildcard() {
        assert!(Required
            .check_pattern(&KeyPattern::compile("a.*").unwrap())
            .is_err());
        assert!(Required
            .check_pattern(&KeyPattern::compile("*").unwrap())
            .is_err());
        assert!(Required
            .check_pattern(&KeyPattern::compile("*.a").unwrap())
            .is_ok());
    }
}

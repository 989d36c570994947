//! Size limits on strings and containers
//!
//! Strings are measured in characters, lists and objects in members. Values
//! of any other kind, and absent keys, are left alone: a size limit does
//! nothing without a value to measure.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{Rule, RuleContext};
use crate::result::ValidationError;
use serde_json::Value;

/// What a size was measured over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    Characters,
    Elements,
}

fn measure(value: &Value) -> Option<(usize, Measure)> {
    match value {
        Value::String(s) => Some((s.chars().count(), Measure::Characters)),
        Value::Array(items) => Some((items.len(), Measure::Elements)),
        Value::Object(members) => Some((members.len(), Measure::Elements)),
        _ => None,
    }
}

fn check<F>(ctx: &RuleContext<'_>, rule: &str, fails: impl Fn(usize) -> bool, message: F) -> Vec<ValidationError>
where
    F: Fn(&str, Measure) -> String,
{
    ctx.candidates()
        .filter_map(|(path, value)| {
            let (size, unit) = measure(value)?;
            fails(size).then(|| ValidationError::new(path, message(path, unit), rule))
        })
        .collect()
}

/// Lower bound on length or member count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinSize(pub usize);

impl MinSize {
    pub const NAME: &'static str = "min";
}

impl Rule for MinSize {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        let min = self.0;
        check(ctx, Self::NAME, |size| size < min, |path, unit| match unit {
            Measure::Characters => format!("{} must have at least {} character(s).", path, min),
            Measure::Elements => format!("{} must contain at least {} element(s).", path, min),
        })
    }
}

/// Upper bound on length or member count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxSize(pub usize);

impl MaxSize {
    pub const NAME: &'static str = "max";
}

impl Rule for MaxSize {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        let max = self.0;
        check(ctx, Self::NAME, |size| size > max, |path, unit| match unit {
            Measure::Characters => format!("{} may not have more than {} character(s).", path, max),
            Measure::Elements => format!("{} may not contain more than {} element(s).", path, max),
        })
    }
}

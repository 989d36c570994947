//! Aggregate sum constraint
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::types::{as_number, is_integer_string};
use super::{Rule, RuleContext};
use crate::result::ValidationError;
use serde_json::Value;

/// Largest difference from the target still treated as equal
pub const SUM_TOLERANCE: f64 = 1e-9;

/// The matched values must add up to a target.
///
/// Values without a numeric reading count as `0` and are never reported on
/// their own; pair the rule with `numeric` or `integer` to catch them. The
/// single error is addressed at the pattern rather than at any leaf.
///
/// When the target and every numeric value are integers the sum is exact.
/// Otherwise values are summed as `f64` and compared within [`SUM_TOLERANCE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumEquals(pub f64);

impl SumEquals {
    pub const NAME: &'static str = "sum_equals";

    /// The target sum
    pub fn target(&self) -> f64 {
        self.0
    }

    fn integer_target(&self) -> Option<i128> {
        let target = self.0;
        (target.fract() == 0.0 && target.abs() < 1e38).then_some(target as i128)
    }
}

/// Integer reading of a value; `Some(0)` for values without a numeric reading
fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        Value::String(s) if is_integer_string(s) => s.parse().ok(),
        other => as_number(other).is_none().then_some(0),
    }
}

fn exact_sum<'a>(mut values: impl Iterator<Item = &'a Value>) -> Option<i128> {
    values.try_fold(0i128, |sum, value| sum.checked_add(as_integer(value)?))
}

impl Rule for SumEquals {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        if ctx.matches().is_empty() {
            return Vec::new();
        }

        let exact = self
            .integer_target()
            .zip(exact_sum(ctx.candidates().map(|(_, value)| value)));
        let balanced = match exact {
            Some((target, sum)) => sum == target,
            None => {
                let sum: f64 = ctx
                    .candidates()
                    .map(|(_, value)| as_number(value).unwrap_or(0.0))
                    .sum();
                (sum - self.0).abs() <= SUM_TOLERANCE
            }
        };
        if balanced {
            return Vec::new();
        }

        let pattern = ctx.pattern().as_str();
        vec![ValidationError::new(
            pattern,
            format!("{} must have a sum equal to {}.", pattern, self.0),
            Self::NAME,
        )]
    }
}

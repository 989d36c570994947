//! Nullable: lets `null` through the rest of a chain
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{Rule, RuleContext, RulePriority};
use crate::result::ValidationError;
use serde_json::Value;

/// Never reports errors; cancels every matched path whose value is `null`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nullable;

impl Nullable {
    pub const NAME: &'static str = "nullable";
}

impl Rule for Nullable {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> RulePriority {
        RulePriority::Cancelling
    }

    fn evaluate(&self, _ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        Vec::new()
    }

    fn cancels(&self, _path: &str, value: &Value) -> bool {
        value.is_null()
    }
}

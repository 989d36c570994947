//! Type rules: string, integer, numeric, boolean and array checks
//!
//! Request bodies frequently arrive form-encoded, so the numeric and boolean
//! checks also accept their string spellings (`"123"`, `"1.5"`, `"0"`).
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{reject_each, Rule, RuleContext};
use crate::result::ValidationError;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static INTEGER_REGEX: OnceLock<Regex> = OnceLock::new();
static DECIMAL_REGEX: OnceLock<Regex> = OnceLock::new();

fn integer_regex() -> &'static Regex {
    INTEGER_REGEX.get_or_init(|| Regex::new(r"^-?\d+$").expect("integer regex is valid"))
}

fn decimal_regex() -> &'static Regex {
    DECIMAL_REGEX.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?\s*$").expect("decimal regex is valid")
    })
}

/// Whether a string spells an integer (`-12`, `007`)
pub fn is_integer_string(s: &str) -> bool {
    integer_regex().is_match(s)
}

/// Whether a string spells a decimal number (`1.5`, `-.5`, `1e3`)
pub fn is_decimal_string(s: &str) -> bool {
    decimal_regex().is_match(s)
}

/// Numeric interpretation of a value, if it has one
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_decimal_string(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The value must be a string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsString;

impl IsString {
    pub const NAME: &'static str = "string";
}

impl Rule for IsString {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        reject_each(ctx, Self::NAME, Value::is_string, |path| {
            format!("{} must be a string.", path)
        })
    }
}

/// The value must be an integer, or a string of digits with optional sign
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsInteger;

impl IsInteger {
    pub const NAME: &'static str = "integer";

    fn accepts(value: &Value) -> bool {
        match value {
            Value::Number(n) => n.is_i64() || n.is_u64(),
            Value::String(s) => is_integer_string(s),
            _ => false,
        }
    }
}

impl Rule for IsInteger {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        reject_each(ctx, Self::NAME, Self::accepts, |path| {
            format!("{} must be an integer.", path)
        })
    }
}

/// The value must be a number, or a string parseable as a decimal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsNumber;

impl IsNumber {
    pub const NAME: &'static str = "numeric";
}

impl Rule for IsNumber {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        reject_each(
            ctx,
            Self::NAME,
            |value| as_number(value).is_some(),
            |path| format!("{} must be numeric.", path),
        )
    }
}

/// The value must be a boolean or one of `0`, `1`, `"0"`, `"1"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsBoolean;

impl IsBoolean {
    pub const NAME: &'static str = "boolean";

    fn accepts(value: &Value) -> bool {
        match value {
            Value::Bool(_) => true,
            Value::Number(n) => matches!(n.as_u64(), Some(0) | Some(1)),
            Value::String(s) => s == "0" || s == "1",
            _ => false,
        }
    }
}

impl Rule for IsBoolean {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        reject_each(ctx, Self::NAME, Self::accepts, |path| {
            format!("{} must be a boolean.", path)
        })
    }
}

/// The value must be a container (list or object)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsArray;

impl IsArray {
    pub const NAME: &'static str = "array";
}

impl Rule for IsArray {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<ValidationError> {
        reject_each(ctx, Self::NAME, crate::dataset::is_container, |path| {
            format!("{} must be an array.", path)
        })
    }
}

//! Declarative rule lists
//!
//! Endpoint tables spell rule chains as strings: `required|integer|sum_equals:0`.
//! Rules are separated by `|`, arguments by `:`. A backslash escapes either
//! separator (and itself) so arguments can contain them, as in
//! `date_format:%H\:%M`. Everything is resolved into rule instances here, at
//! specification-build time, so a typo in a table fails before any request
//! is validated.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{
    DateFormat, IsArray, IsBoolean, IsInteger, IsNumber, IsString, MaxSize, MinSize, Nullable,
    Required, Rule, SumEquals,
};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separates rules in a rule list
pub const RULE_SEPARATOR: char = '|';

/// Separates a rule name from its arguments
pub const ARGUMENT_SEPARATOR: char = ':';

const ESCAPE: char = '\\';

/// One rule as written in a table: a name plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleToken {
    pub name: String,
    pub arguments: Vec<String>,
}

impl RuleToken {
    /// Create a token from its parts
    pub fn new<I, S>(name: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a whole rule list into tokens, skipping empty entries
    pub fn parse_list(list: &str) -> Vec<RuleToken> {
        tokenize(list)
            .into_iter()
            .filter_map(|mut parts| {
                let name = parts.remove(0).trim().to_string();
                if name.is_empty() && parts.is_empty() {
                    return None;
                }
                Some(RuleToken {
                    name,
                    arguments: parts,
                })
            })
            .collect()
    }

    /// Resolve the token into a rule instance
    pub fn build(&self) -> Result<Box<dyn Rule>> {
        let rule: Box<dyn Rule> = match self.name.as_str() {
            "required" => self.bare(Required)?,
            "string" | "str" => self.bare(IsString)?,
            "integer" | "int" => self.bare(IsInteger)?,
            "numeric" | "number" | "float" | "double" => self.bare(IsNumber)?,
            "boolean" | "bool" => self.bare(IsBoolean)?,
            "array" => self.bare(IsArray)?,
            "nullable" | "null" => self.bare(Nullable)?,
            "date_format" => {
                // Unescaped colons are part of the format, not extra arguments.
                Box::new(DateFormat::new(self.arguments.join(":"))?)
            }
            "min" | "minimum" => Box::new(MinSize(self.size(MinSize::NAME)?)),
            "max" | "maximum" => Box::new(MaxSize(self.size(MaxSize::NAME)?)),
            "sum_equals" | "sum" => Box::new(SumEquals(self.number(SumEquals::NAME)?)),
            _ => {
                return Err(Error::UnknownRule {
                    name: self.name.clone(),
                })
            }
        };
        Ok(rule)
    }

    fn bare<R: Rule + 'static>(&self, rule: R) -> Result<Box<dyn Rule>> {
        match self.arguments.first() {
            Some(argument) => Err(Error::invalid_argument(
                rule.name(),
                argument.as_str(),
                "the rule takes no arguments",
            )),
            None => Ok(Box::new(rule)),
        }
    }

    fn single_argument(&self, rule: &str, expected: &str) -> Result<&str> {
        match self.arguments.as_slice() {
            [] => Err(Error::missing_argument(rule, expected)),
            [argument] => Ok(argument.trim()),
            arguments => Err(Error::invalid_argument(
                rule,
                arguments.join(":"),
                format!("expected exactly one argument ({})", expected),
            )),
        }
    }

    fn size(&self, rule: &str) -> Result<usize> {
        let expected = "a non-negative integer";
        let argument = self.single_argument(rule, expected)?;
        argument
            .parse()
            .map_err(|_| Error::invalid_argument(rule, argument, format!("expected {}", expected)))
    }

    fn number(&self, rule: &str) -> Result<f64> {
        let expected = "a finite number";
        let argument = self.single_argument(rule, expected)?;
        match argument.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(Error::invalid_argument(rule, argument, format!("expected {}", expected))),
        }
    }
}

impl FromStr for RuleToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = RuleToken::parse_list(s);
        if tokens.len() != 1 {
            return Err(Error::UnknownRule {
                name: s.to_string(),
            });
        }
        Ok(tokens.remove(0))
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape(&self.name))?;
        for argument in &self.arguments {
            write!(f, "{}{}", ARGUMENT_SEPARATOR, escape(argument))?;
        }
        Ok(())
    }
}

/// Parse a single rule such as `min:1`
pub fn parse_rule(token: &str) -> Result<Box<dyn Rule>> {
    token.parse::<RuleToken>()?.build()
}

/// Parse a `|`-delimited rule list, preserving declaration order
pub fn parse_rule_list(list: &str) -> Result<Vec<Box<dyn Rule>>> {
    RuleToken::parse_list(list)
        .iter()
        .map(RuleToken::build)
        .collect()
}

/// Split a rule list into tokens, each token into name and arguments
fn tokenize(list: &str) -> Vec<Vec<String>> {
    let mut tokens = Vec::new();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = list.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(next @ (RULE_SEPARATOR | ARGUMENT_SEPARATOR | ESCAPE)) => current.push(next),
                Some(other) => {
                    current.push(ESCAPE);
                    current.push(other);
                }
                None => current.push(ESCAPE),
            },
            RULE_SEPARATOR => {
                parts.push(std::mem::take(&mut current));
                tokens.push(std::mem::take(&mut parts));
            }
            ARGUMENT_SEPARATOR => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    tokens.push(parts);
    tokens
}

fn escape(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for c in part.chars() {
        if matches!(c, RULE_SEPARATOR | ARGUMENT_SEPARATOR | ESCAPE) {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

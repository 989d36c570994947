//! The validation engine
//!
//! Validation flattens the input once and then runs every pattern's rule
//! chain independently against the shared [`DataSet`]. Within a chain, rules
//! run in order; after each rule the engine asks it which matched paths it
//! cancels, and later rules in the same chain skip those paths. Failures of
//! one pattern never affect another.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::dataset::DataSet;
use crate::error::Result;
use crate::result::ValidationResult;
use crate::rules::RuleContext;
use crate::spec::{PatternRules, RuleSpecification};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, trace};

/// A reusable validator around one compiled specification.
///
/// Validators hold no per-call state and can be shared across threads.
#[derive(Debug, Default)]
pub struct Validator {
    specification: RuleSpecification,
}

impl Validator {
    /// Create a validator for a built specification
    pub fn new(specification: RuleSpecification) -> Self {
        Self { specification }
    }

    /// Build the specification from a declarative table and wrap it
    pub fn from_table<I, P, R>(table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        RuleSpecification::from_table(table).map(Self::new)
    }

    /// The specification this validator checks against
    pub fn specification(&self) -> &RuleSpecification {
        &self.specification
    }

    /// Validate `data`, collecting every data error
    pub fn validate(&self, data: &Value) -> ValidationResult {
        validate(&self.specification, data)
    }
}

impl From<RuleSpecification> for Validator {
    fn from(specification: RuleSpecification) -> Self {
        Self::new(specification)
    }
}

/// Validate `data` against `specification`
pub fn validate(specification: &RuleSpecification, data: &Value) -> ValidationResult {
    let dataset = DataSet::new(data);
    let mut result = ValidationResult::new();

    for entry in specification {
        run_chain(entry, &dataset, &mut result);
    }

    debug!(
        patterns = specification.len(),
        entries = dataset.len(),
        errors = result.error_count(),
        "validated data"
    );
    result
}

fn run_chain(entry: &PatternRules, dataset: &DataSet<'_>, result: &mut ValidationResult) {
    let pattern = entry.pattern();
    let matches = pattern.matching_entries(dataset);
    let mut cancelled: HashSet<String> = HashSet::new();
    let mut emitted = 0;

    for rule in entry.rules() {
        let errors = rule.evaluate(&RuleContext::new(dataset, pattern, &matches, &cancelled));
        emitted += errors.len();
        result.extend(errors);

        for &(path, value) in &matches {
            if !cancelled.contains(path) && rule.cancels(path, value) {
                cancelled.insert(path.to_string());
            }
        }
    }

    trace!(
        pattern = %pattern,
        matches = matches.len(),
        cancelled = cancelled.len(),
        errors = emitted,
        "evaluated rule chain"
    );
}

//! Tally Core - rule-driven validation for dynamically shaped request data
//!
//! This crate checks arbitrary nested data (maps, lists, scalars) against a
//! declarative table of rules addressed by dotted key patterns:
//! - **DataSet**: flattens a value into a registry of dotted paths
//! - **KeyPattern**: literal segments plus single-segment `*` wildcards
//! - **Rules**: presence, type, date format, size and aggregate sum checks
//! - **Validator**: runs every pattern's rule chain and collects errors
//!
//! ## Features
//!
//! - **Per-row errors**: `required` on `transactions.*.account` reports
//!   `transactions.1.account`, not the pattern
//! - **Nullable chains**: `integer|nullable` and `nullable|integer` behave the same
//! - **Ledger balancing**: `sum_equals:0` over signed amounts
//! - **Early failure**: unknown rules and bad arguments fail when the
//!   specification is built, never during validation
//!
//! ## Quick Start
//!
//! ```rust
//! use tally_core::Validator;
//! use serde_json::json;
//!
//! let validator = Validator::from_table([
//!     ("date", "required|date_format:%Y-%m-%d"),
//!     ("transactions", "required|array|min:1"),
//!     ("transactions.*.account", "required|integer"),
//!     ("transactions.*.amount", "required|integer|sum_equals:0"),
//! ])
//! .unwrap();
//!
//! let result = validator.validate(&json!({
//!     "date": "2021-01-01",
//!     "transactions": [
//!         {"account": 1930, "amount": 100},
//!         {"amount": -50}
//!     ]
//! }));
//!
//! assert_eq!(result.messages_for("transactions.1.account"), vec!["transactions.1.account is required."]);
//! assert_eq!(
//!     result.messages_for("transactions.*.amount"),
//!     vec!["transactions.*.amount must have a sum equal to 0."]
//! );
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod dataset;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod result;
pub mod rules;
pub mod spec;

// Re-export commonly used types for convenience
pub use dataset::{flatten, DataSet, ROOT_KEY};
pub use engine::{validate, Validator};
pub use error::{Error, Result};
pub use pattern::KeyPattern;
pub use result::{ValidationError, ValidationResult};
pub use rules::{Rule, RuleContext, RulePriority};
pub use spec::{PatternRules, RuleSpecification, RuleSpecificationBuilder};

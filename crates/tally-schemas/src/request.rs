//! Request rejection contract
//!
//! A request body that fails validation is answered with
//! `422 Unprocessable Entity` and a body mapping each offending path to its
//! messages:
//!
//! ```json
//! { "transactions.1.account_id": ["transactions.1.account_id is required."] }
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tally_core::{validate, RuleSpecification, ValidationResult};
use thiserror::Error;
use tracing::debug;

/// HTTP status used for rejected request bodies
pub const UNPROCESSABLE_ENTITY: u16 = 422;

/// A rejected request: the status and error body to respond with
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("request rejected with status {status}: {} invalid path(s)", body.len())]
pub struct Rejection {
    pub status: u16,
    pub body: BTreeMap<String, Vec<String>>,
}

impl Rejection {
    /// Build a rejection from a failed validation result
    pub fn from_result(result: &ValidationResult) -> Self {
        Self {
            status: UNPROCESSABLE_ENTITY,
            body: result.error_map(),
        }
    }

    /// The response body as JSON
    pub fn body_json(&self) -> Value {
        serde_json::to_value(&self.body).unwrap_or(Value::Null)
    }
}

/// Validate a request body, rejecting it if any rule fails
pub fn check_request(specification: &RuleSpecification, body: &Value) -> Result<(), Rejection> {
    let result = validate(specification, body);
    if result.is_valid() {
        return Ok(());
    }
    debug!(errors = result.error_count(), "rejecting request body");
    Err(Rejection::from_result(&result))
}

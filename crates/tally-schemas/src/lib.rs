//! Tally Schemas - endpoint rule tables for the bookkeeping API
//!
//! This crate owns everything between an HTTP handler and the validation
//! engine in `tally-core`:
//! - **Endpoints**: the built-in rule table of every request-accepting endpoint
//! - **Loader**: rule tables read from YAML, JSON or TOML files
//! - **Registry**: compiled tables by name, files overriding built-ins
//! - **Request**: the 422 rejection contract handlers respond with
//!
//! ## Quick Start
//!
//! ```rust
//! use tally_schemas::{check_request, Endpoint};
//! use serde_json::json;
//!
//! let spec = Endpoint::CreateVoucher.specification().unwrap();
//! let body = json!({
//!     "date": "2021-01-01",
//!     "description": "Coffee",
//!     "transactions": [
//!         {"account_id": 5460, "amount": 4000},
//!         {"amount": -4000}
//!     ]
//! });
//!
//! let rejection = check_request(&spec, &body).unwrap_err();
//! assert_eq!(rejection.status, 422);
//! assert_eq!(
//!     rejection.body["transactions.1.account_id"],
//!     vec!["transactions.1.account_id is required."]
//! );
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod endpoints;
pub mod error;
pub mod loader;
pub mod registry;
pub mod request;

// Re-export commonly used types for convenience
pub use endpoints::{Endpoint, Table};
pub use error::{SchemaError, SchemaResult};
pub use loader::{load_file, Format, RuleList, RuleTable};
pub use registry::{RegisteredTable, SchemaRegistry, TableSource};
pub use request::{check_request, Rejection, UNPROCESSABLE_ENTITY};

//! Built-in rule tables for the bookkeeping API
//!
//! Every request-accepting endpoint declares its table here. Tables are plain
//! `(pattern, rules)` pairs so they read the way they are documented and can
//! be listed by the CLI without compiling them.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tally_core::RuleSpecification;

/// A declarative rule table: pattern → `|`-delimited rule list
pub type Table = &'static [(&'static str, &'static str)];

const LOGIN: Table = &[
    ("username", "required|string"),
    ("password", "required|string"),
];

const INIT: Table = &[
    ("organization", "required|string"),
    ("username", "required|string"),
    ("password", "required|string"),
];

const UPDATE_USER: Table = &[
    ("carry_accounts", "string"),
    ("password", "string"),
    ("username", "string"),
];

// Signed amounts in minor units; the rows of a voucher must balance.
const CREATE_VOUCHER: Table = &[
    ("date", "required|date_format:%Y-%m-%d"),
    ("description", "required|string"),
    ("transactions", "required|array|min:1"),
    ("transactions.*.account_id", "required|integer"),
    ("transactions.*.amount", "required|integer|sum_equals:0"),
];

const CREATE_INVOICE_TEMPLATE: Table = &[
    ("name", "required|string|min:1"),
    ("body", "required|string|min:1"),
];

const UPDATE_INVOICE_TEMPLATE: Table = &[
    ("name", "string|min:1"),
    ("body", "string|min:1"),
];

const INVOICE_DATASET: Table = &[
    ("name", "required|string|min:1"),
    ("vat_rate", "required|numeric"),
    ("currency_code", "required|string|min:3"),
    ("precision", "required|integer"),
    ("extends_id", "integer|nullable"),
    ("invoice_template_id", "required|integer"),
    ("fields", "array"),
    ("fields.*.name", "required|string|min:1"),
    ("fields.*.key", "string"),
    ("fields.*.value", "string"),
    ("fields.*.sorting", "numeric"),
    ("fields.*.is_editable", "boolean"),
    ("fields.*.is_visible", "boolean"),
    ("line_items", "array"),
    ("line_items.*.name", "required|string|min:1"),
    ("line_items.*.key", "string"),
    ("line_items.*.kind", "required|string|min:1"),
    ("line_items.*.price", "numeric"),
    ("line_items.*.quantity", "numeric"),
];

/// Request-accepting endpoints of the bookkeeping API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Login,
    Init,
    UpdateUser,
    CreateVoucher,
    CreateInvoiceTemplate,
    UpdateInvoiceTemplate,
    CreateInvoiceDataset,
    UpdateInvoiceDataset,
    RenderInvoice,
}

impl Endpoint {
    /// Every endpoint, in documentation order
    pub const ALL: [Endpoint; 9] = [
        Endpoint::Login,
        Endpoint::Init,
        Endpoint::UpdateUser,
        Endpoint::CreateVoucher,
        Endpoint::CreateInvoiceTemplate,
        Endpoint::UpdateInvoiceTemplate,
        Endpoint::CreateInvoiceDataset,
        Endpoint::UpdateInvoiceDataset,
        Endpoint::RenderInvoice,
    ];

    /// The snake_case name tables are registered under
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Init => "init",
            Endpoint::UpdateUser => "update_user",
            Endpoint::CreateVoucher => "create_voucher",
            Endpoint::CreateInvoiceTemplate => "create_invoice_template",
            Endpoint::UpdateInvoiceTemplate => "update_invoice_template",
            Endpoint::CreateInvoiceDataset => "create_invoice_dataset",
            Endpoint::UpdateInvoiceDataset => "update_invoice_dataset",
            Endpoint::RenderInvoice => "render_invoice",
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Endpoint::Login => "Exchange credentials for a token",
            Endpoint::Init => "Create the first organization and user",
            Endpoint::UpdateUser => "Change username, password or carried accounts",
            Endpoint::CreateVoucher => "Book a balanced voucher of transactions",
            Endpoint::CreateInvoiceTemplate => "Create an invoice template",
            Endpoint::UpdateInvoiceTemplate => "Update an invoice template",
            Endpoint::CreateInvoiceDataset => "Create an invoice dataset",
            Endpoint::UpdateInvoiceDataset => "Update an invoice dataset",
            Endpoint::RenderInvoice => "Render an invoice dataset through its template",
        }
    }

    /// The endpoint's declarative rule table
    pub fn table(&self) -> Table {
        match self {
            Endpoint::Login => LOGIN,
            Endpoint::Init => INIT,
            Endpoint::UpdateUser => UPDATE_USER,
            Endpoint::CreateVoucher => CREATE_VOUCHER,
            Endpoint::CreateInvoiceTemplate => CREATE_INVOICE_TEMPLATE,
            Endpoint::UpdateInvoiceTemplate => UPDATE_INVOICE_TEMPLATE,
            Endpoint::CreateInvoiceDataset
            | Endpoint::UpdateInvoiceDataset
            | Endpoint::RenderInvoice => INVOICE_DATASET,
        }
    }

    /// Compile the endpoint's table
    pub fn specification(&self) -> SchemaResult<RuleSpecification> {
        RuleSpecification::from_table(self.table().iter().copied())
            .map_err(|e| SchemaError::specification(self.name(), e))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = SchemaError;

    fn from_str(s: &str) -> SchemaResult<Self> {
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == s)
            .ok_or_else(|| SchemaError::UnknownTable {
                name: s.to_string(),
                available: Endpoint::ALL.iter().map(|e| e.name().to_string()).collect(),
            })
    }
}

//! Named, compiled rule tables
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::endpoints::Endpoint;
use crate::error::{SchemaError, SchemaResult};
use crate::loader;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tally_core::{RuleSpecification, ValidationResult, Validator};
use tracing::{info, warn};

/// Where a registered table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// One of the built-in endpoint tables
    BuiltIn(Endpoint),
    /// A rule-table file
    File(PathBuf),
    /// Registered programmatically
    Custom,
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::BuiltIn(_) => write!(f, "built-in"),
            TableSource::File(path) => write!(f, "{}", path.display()),
            TableSource::Custom => write!(f, "custom"),
        }
    }
}

/// A compiled table plus its origin
#[derive(Debug)]
pub struct RegisteredTable {
    validator: Validator,
    source: TableSource,
}

impl RegisteredTable {
    /// The validator for this table
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// The compiled specification
    pub fn specification(&self) -> &RuleSpecification {
        self.validator.specification()
    }

    /// Where the table came from
    pub fn source(&self) -> &TableSource {
        &self.source
    }
}

/// Compiled rule tables by name.
///
/// Later registrations replace earlier ones with the same name, so tables
/// loaded from files override built-ins.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    tables: BTreeMap<String, RegisteredTable>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in endpoint table
    pub fn with_builtins() -> SchemaResult<Self> {
        let mut registry = Self::new();
        for endpoint in Endpoint::ALL {
            registry.insert(
                endpoint.name(),
                endpoint.specification()?,
                TableSource::BuiltIn(endpoint),
            );
        }
        Ok(registry)
    }

    /// Register a compiled table, replacing any table of the same name
    pub fn insert(&mut self, name: impl Into<String>, specification: RuleSpecification, source: TableSource) {
        let name = name.into();
        let table = RegisteredTable {
            validator: Validator::new(specification),
            source,
        };
        if let Some(previous) = self.tables.insert(name.clone(), table) {
            warn!(
                table = %name,
                previous = %previous.source,
                "rule table overrides an existing table"
            );
        }
    }

    /// Load every table from a rule-table file, returning how many were added
    pub fn load_file(&mut self, path: &Path) -> SchemaResult<usize> {
        let tables = loader::load_file(path)?;
        // Compile everything first so a broken file registers nothing.
        let compiled = tables
            .iter()
            .map(|table| -> SchemaResult<(String, RuleSpecification)> {
                Ok((table.name.clone(), table.compile()?))
            })
            .collect::<SchemaResult<Vec<_>>>()?;

        let count = compiled.len();
        for (name, specification) in compiled {
            self.insert(name, specification, TableSource::File(path.to_path_buf()));
        }
        info!(path = %path.display(), tables = count, "registered rule tables");
        Ok(count)
    }

    /// Look up a table by name
    pub fn get(&self, name: &str) -> SchemaResult<&RegisteredTable> {
        self.tables.get(name).ok_or_else(|| SchemaError::UnknownTable {
            name: name.to_string(),
            available: self.names().map(str::to_string).collect(),
        })
    }

    /// Validate `body` against the named table
    pub fn validate(&self, name: &str, body: &Value) -> SchemaResult<ValidationResult> {
        Ok(self.get(name)?.validator().validate(body))
    }

    /// Whether a table is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Registered tables in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredTable)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    /// Number of registered tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

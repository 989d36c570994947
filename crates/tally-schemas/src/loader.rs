//! Rule-table files
//!
//! A rule-table file maps table names to tables, and each table maps key
//! patterns to rule lists. A rule list is either a `|`-delimited string or a
//! list of single rule tokens:
//!
//! ```yaml
//! create_widget:
//!   name: required|string|min:1
//!   "parts.*.id": [required, integer]
//!   "parts.*.weight": numeric|nullable
//! ```
//!
//! YAML, JSON and TOML are accepted; the format is picked by file extension.
//! Patterns keep their order from the file.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use serde_json::{Map, Value};
use std::path::Path;
use tally_core::rules::parse_rule;
use tally_core::RuleSpecification;
use tracing::debug;

/// Supported rule-table file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
    /// TOML format (.toml)
    Toml,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> SchemaResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| SchemaError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        match extension.as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            _ => Err(SchemaError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// The rules declared for one pattern in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleList {
    /// `required|integer|min:1`
    Pipe(String),
    /// `[required, integer, "min:1"]`
    Tokens(Vec<String>),
}

/// One named table read from a file, patterns in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub name: String,
    pub entries: Vec<(String, RuleList)>,
}

impl RuleTable {
    /// Compile the table into a rule specification
    pub fn compile(&self) -> SchemaResult<RuleSpecification> {
        let mut builder = RuleSpecification::builder();
        for (pattern, list) in &self.entries {
            builder = match list {
                RuleList::Pipe(list) => builder.parse(pattern, list),
                RuleList::Tokens(tokens) => {
                    let rules = tokens
                        .iter()
                        .map(|token| parse_rule(token))
                        .collect::<tally_core::Result<Vec<_>>>()
                        .map_err(|e| SchemaError::specification(&self.name, e))?;
                    builder.rules(pattern, rules)
                }
            };
        }
        builder
            .build()
            .map_err(|e| SchemaError::specification(&self.name, e))
    }
}

/// Read and parse a rule-table file
pub fn load_file(path: &Path) -> SchemaResult<Vec<RuleTable>> {
    let format = Format::from_path(path)?;
    let content =
        std::fs::read_to_string(path).map_err(|e| SchemaError::io_error(path, e))?;
    let tables = parse_content(&content, format, path)?;
    debug!(path = %path.display(), tables = tables.len(), "loaded rule tables");
    Ok(tables)
}

/// Parse rule-table content in an explicit format; `path` is for error context
pub fn parse_content(content: &str, format: Format, path: &Path) -> SchemaResult<Vec<RuleTable>> {
    let value = match format {
        Format::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| SchemaError::YamlParseError {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            serde_json::to_value(yaml).map_err(|e| SchemaError::JsonParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        }
        Format::Json => serde_json::from_str(content).map_err(|e| SchemaError::JsonParseError {
            path: path.to_path_buf(),
            source: e,
        })?,
        Format::Toml => toml::from_str(content).map_err(|e| SchemaError::TomlParseError {
            path: path.to_path_buf(),
            source: e,
        })?,
    };
    tables_from_value(value, path)
}

fn tables_from_value(value: Value, path: &Path) -> SchemaResult<Vec<RuleTable>> {
    let Value::Object(tables) = value else {
        return Err(SchemaError::invalid_table(
            path,
            "the top level must map table names to tables",
        ));
    };

    tables
        .into_iter()
        .map(|(name, table)| match table {
            Value::Object(entries) => table_from_map(name, entries, path),
            _ => Err(SchemaError::invalid_table(
                path,
                format!("table '{}' must map key patterns to rule lists", name),
            )),
        })
        .collect()
}

fn table_from_map(name: String, entries: Map<String, Value>, path: &Path) -> SchemaResult<RuleTable> {
    let entries = entries
        .into_iter()
        .map(|(pattern, rules)| {
            let list = match rules {
                Value::Null => RuleList::Tokens(Vec::new()),
                Value::String(list) => RuleList::Pipe(list),
                Value::Array(items) => RuleList::Tokens(
                    items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(token) => Ok(token),
                            other => Err(SchemaError::invalid_table(
                                path,
                                format!(
                                    "rule '{}' for '{}' in table '{}' must be a string",
                                    other, pattern, name
                                ),
                            )),
                        })
                        .collect::<SchemaResult<_>>()?,
                ),
                other => {
                    return Err(SchemaError::invalid_table(
                        path,
                        format!(
                            "rules for '{}' in table '{}' must be a string or a list, found {}",
                            pattern, name, other
                        ),
                    ))
                }
            };
            Ok((pattern, list))
        })
        .collect::<SchemaResult<_>>()?;

    Ok(RuleTable { name, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn path(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(&path("a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(&path("a.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(&path("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(&path("a.toml")).unwrap(), Format::Toml);
        assert!(Format::from_path(&path("a.txt")).is_err());
        assert!(Format::from_path(&path("rules")).is_err());
    }

    #[test]
    fn test_yaml_tables_keep_file_order() {
        let content = r#"
widget:
  zeta: required|string
  "parts.*.id": [required, integer]
  alpha: ~
"#;
        let tables = parse_content(content, Format::Yaml, &path("t.yaml")).unwrap();
        assert_eq!(
            tables,
            vec![RuleTable {
                name: "widget".to_string(),
                entries: vec![
                    ("zeta".to_string(), RuleList::Pipe("required|string".to_string())),
                    (
                        "parts.*.id".to_string(),
                        RuleList::Tokens(vec!["required".to_string(), "integer".to_string()])
                    ),
                    ("alpha".to_string(), RuleList::Tokens(Vec::new())),
                ],
            }]
        );
        let spec = tables[0].compile().unwrap();
        assert_eq!(spec.patterns().collect::<Vec<_>>(), vec!["zeta", "parts.*.id", "alpha"]);
    }

    #[test]
    fn test_json_and_toml() {
        let json = r#"{"login": {"username": "required|string"}}"#;
        let toml = "[login]\nusername = \"required|string\"\n";
        let from_json = parse_content(json, Format::Json, &path("t.json")).unwrap();
        let from_toml = parse_content(toml, Format::Toml, &path("t.toml")).unwrap();
        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn test_token_lists_keep_colons_in_arguments() {
        let content = r#"{"t": {"at": ["required", "date_format:%H:%M"]}}"#;
        let tables = parse_content(content, Format::Json, &path("t.json")).unwrap();
        let spec = tables[0].compile().unwrap();
        assert_eq!(spec.get("at").unwrap().rule_names(), vec!["required", "date_format"]);
    }

    #[test]
    fn test_shape_errors() {
        let cases = [
            "[1, 2]",
            r#"{"t": "required"}"#,
            r#"{"t": {"a": 5}}"#,
            r#"{"t": {"a": ["required", 5]}}"#,
        ];
        for content in cases {
            let err = parse_content(content, Format::Json, &path("t.json")).unwrap_err();
            assert!(matches!(err, SchemaError::InvalidTable { .. }), "{}", content);
        }
    }

    #[test]
    fn test_compile_reports_table_name() {
        let table = RuleTable {
            name: "broken".to_string(),
            entries: vec![("a".to_string(), RuleList::Pipe("required|yeet".to_string()))],
        };
        match table.compile().unwrap_err() {
            SchemaError::Specification { table, .. } => assert_eq!(table, "broken"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_content("{", Format::Json, &path("t.json")),
            Err(SchemaError::JsonParseError { .. })
        ));
        assert!(matches!(
            parse_content("a: [", Format::Yaml, &path("t.yaml")),
            Err(SchemaError::YamlParseError { .. })
        ));
        assert!(matches!(
            parse_content("a = ", Format::Toml, &path("t.toml")),
            Err(SchemaError::TomlParseError { .. })
        ));
    }
}

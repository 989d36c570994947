//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tally_schemas::SchemaRegistry;
use tracing::debug;

/// Load a request body from a JSON or YAML file
pub fn load_body(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    let body = if is_yaml {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })?
    };

    debug!(path = %path.display(), "Loaded request body");
    Ok(body)
}

/// Built-in endpoint tables plus every rule file named in the configuration
pub fn build_registry(config: &Config) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::with_builtins()?;
    for file in config.rules_files() {
        registry.load_file(&file)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathConfig;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_and_yaml_bodies() {
        let dir = TempDir::new().unwrap();
        let json_path = dir.path().join("body.json");
        let yaml_path = dir.path().join("body.yml");
        fs::write(&json_path, r#"{"email": "a@b.c", "password": "x"}"#).unwrap();
        fs::write(&yaml_path, "email: a@b.c\npassword: x\n").unwrap();

        let expected = json!({"email": "a@b.c", "password": "x"});
        assert_eq!(load_body(&json_path).unwrap(), expected);
        assert_eq!(load_body(&yaml_path).unwrap(), expected);
    }

    #[test]
    fn test_load_body_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_body(&missing), Err(Error::FileNotFound { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ nope").unwrap();
        assert!(matches!(load_body(&broken), Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_registry_includes_configured_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("rules.yaml"),
            "login:\n  email: required|string\n  otp: required|integer\n",
        )
        .unwrap();

        let config = Config {
            paths: PathConfig {
                rules_files: vec!["rules.yaml".into()],
            },
            source: Some(dir.path().join("tally.yaml")),
            ..Config::default()
        };

        let registry = build_registry(&config).unwrap();
        assert!(registry.contains("create_voucher"));
        let login = registry.get("login").unwrap();
        assert!(login.specification().get("otp").is_some());
    }
}

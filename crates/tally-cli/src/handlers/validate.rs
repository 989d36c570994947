//! Validate command handler

use super::utils::{build_registry, load_body};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::redaction;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use tally_core::DataSet;
use tally_schemas::SchemaRegistry;
use tracing::{debug, instrument};

/// Handle the validate command
#[instrument(skip(config, output), fields(body = %args.body.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let body = load_body(&args.body)?;

    let (registry, name) = resolve_table(&args, config)?;
    let table = registry.get(&name)?;

    output.info(&format!(
        "Validating {} against table '{}' ({})",
        args.body.display(),
        name,
        table.source()
    ))?;

    if tracing::enabled!(tracing::Level::DEBUG) {
        let mut redacted = body.clone();
        redaction::redact_json_value(&mut redacted);
        debug!(table = %name, body = %redacted, "Request body");
    }

    let timer = Timer::with_details("validate", &name);
    let result = table.validator().validate(&body);
    let elapsed = timer.finish();
    output.debug(&format!(
        "Checked {} pattern(s) in {:?}",
        table.specification().len(),
        elapsed
    ))?;

    let dataset = config.output.show_values.then(|| DataSet::new(&body));
    output.validation_result(&result, dataset.as_ref())?;

    if result.is_valid() {
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            errors: result.error_count(),
            paths: result.path_count(),
        })
    }
}

/// Pick the registry and table name the body is validated against.
///
/// `--rules FILE --table NAME` uses only that file's tables; otherwise the
/// table comes from `--endpoint` or the configured default endpoint and is
/// looked up among the built-ins and configured rule files.
fn resolve_table(args: &ValidateArgs, config: &Config) -> Result<(SchemaRegistry, String)> {
    if let (Some(rules), Some(table)) = (&args.rules, &args.table) {
        let mut registry = SchemaRegistry::new();
        registry.load_file(rules)?;
        return Ok((registry, table.clone()));
    }

    let name = args
        .endpoint
        .clone()
        .or_else(|| config.default_endpoint.clone())
        .ok_or_else(|| {
            Error::invalid_args("no rule table given; pass --endpoint NAME or --rules FILE --table NAME")
        })?;

    Ok((build_registry(config)?, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, 0, Box::new(std::io::sink()))
    }

    fn args(body: PathBuf) -> ValidateArgs {
        ValidateArgs {
            body,
            endpoint: None,
            rules: None,
            table: None,
        }
    }

    #[test]
    fn test_balanced_voucher_passes() {
        let dir = TempDir::new().unwrap();
        let body = dir.path().join("voucher.json");
        fs::write(
            &body,
            r#"{"date": "2021-01-01", "description": "Coffee",
                "transactions": [{"account_id": 5460, "amount": 4000},
                                 {"account_id": 1930, "amount": -4000}]}"#,
        )
        .unwrap();

        let args = ValidateArgs {
            endpoint: Some("create_voucher".to_string()),
            ..args(body)
        };
        handle_validate(args, &Config::default(), &mut quiet_output()).unwrap();
    }

    #[test]
    fn test_unbalanced_voucher_fails() {
        let dir = TempDir::new().unwrap();
        let body = dir.path().join("voucher.yaml");
        fs::write(
            &body,
            "date: '2021-01-01'\ndescription: Coffee\ntransactions:\n  - {account_id: 5460, amount: 4000}\n  - {account_id: 1930, amount: -3999}\n",
        )
        .unwrap();

        let config = Config {
            default_endpoint: Some("create_voucher".to_string()),
            ..Config::default()
        };
        let error = handle_validate(args(body), &config, &mut quiet_output()).unwrap_err();
        assert!(matches!(error, Error::ValidationFailed { errors: 1, paths: 1 }));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_rules_file_table() {
        let dir = TempDir::new().unwrap();
        let rules = dir.path().join("rules.toml");
        fs::write(&rules, "[signup]\nemail = \"required|string\"\nage = \"integer|nullable\"\n").unwrap();
        let body = dir.path().join("body.json");
        fs::write(&body, r#"{"email": 42, "age": null}"#).unwrap();

        let args = ValidateArgs {
            rules: Some(rules),
            table: Some("signup".to_string()),
            ..args(body)
        };
        let error = handle_validate(args, &Config::default(), &mut quiet_output()).unwrap_err();
        assert!(matches!(error, Error::ValidationFailed { errors: 1, paths: 1 }));
    }

    #[test]
    fn test_missing_table_name() {
        let dir = TempDir::new().unwrap();
        let body = dir.path().join("body.json");
        fs::write(&body, "{}").unwrap();

        let error = handle_validate(args(body), &Config::default(), &mut quiet_output()).unwrap_err();
        assert!(error.should_show_help());
    }

    #[test]
    fn test_unknown_endpoint() {
        let dir = TempDir::new().unwrap();
        let body = dir.path().join("body.json");
        fs::write(&body, "{}").unwrap();

        let args = ValidateArgs {
            endpoint: Some("delete_everything".to_string()),
            ..args(body)
        };
        let error = handle_validate(args, &Config::default(), &mut quiet_output()).unwrap_err();
        assert!(matches!(error, Error::Schema(_)));
    }
}

//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use anyhow::Context;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Path => handle_config_path(config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(Error::config(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    Config::default()
        .save(&args.path)
        .map_err(anyhow::Error::from)
        .with_context(|| format!("writing default configuration to {}", args.path.display()))?;

    output.success(&format!("✓ Wrote default configuration to {}", args.path.display()))
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let rendered = match args.format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    if let Some(source) = &config.source {
        output.info(&format!("Loaded from {}", source.display()))?;
    }
    output.write(&rendered)?;
    if !rendered.ends_with('\n') {
        output.writeln("")?;
    }
    Ok(())
}

/// Handle config path subcommand
fn handle_config_path(config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.section("Configuration Sources")?;

    for path in Config::default_config_paths() {
        let marker = if config.source.as_deref() == Some(path.as_path()) {
            "→"
        } else if path.exists() {
            "✓"
        } else {
            "✗"
        };
        output.writeln(&format!("{} {}", marker, path.display()))?;
    }

    if let Some(source) = &config.source {
        if !Config::default_config_paths().contains(source) {
            output.writeln(&format!("→ {}", source.display()))?;
        }
    }

    for var in ["TALLY_CONFIG", "TALLY_LOG_FORMAT", "TALLY_LOG_FILE", "RUST_LOG"] {
        if let Ok(value) = std::env::var(var) {
            output.info(&format!("{} = {}", var, value))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use tempfile::TempDir;

    fn output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, 0, Box::new(std::io::sink()))
    }

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".tally.yaml");

        let args = ConfigInitArgs { path: path.clone(), force: false };
        handle_config_init(args, &mut output()).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.output, Config::default().output);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tally.json");
        std::fs::write(&path, "{}").unwrap();

        let args = ConfigInitArgs { path: path.clone(), force: false };
        assert!(matches!(handle_config_init(args, &mut output()), Err(Error::Config(_))));

        let args = ConfigInitArgs { path, force: true };
        handle_config_init(args, &mut output()).unwrap();
    }

    #[test]
    fn test_show_every_format() {
        for format in [ConfigFormat::Toml, ConfigFormat::Json, ConfigFormat::Yaml] {
            let args = ConfigShowArgs { format };
            handle_config_show(args, &Config::default(), &mut output()).unwrap();
        }
    }
}

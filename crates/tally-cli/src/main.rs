//! Tally CLI - Command-line interface for rule-driven request validation
//!
//! This is the main entry point for the Tally CLI application, providing
//! commands for validating request bodies against endpoint rule tables and
//! for inspecting how bodies are flattened and matched.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig, LoggingGuard};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Logging settings may come from the config file, so load it first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, cli.use_color()),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    let guard = match init_logging(&cli, &config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    if let Err(e) = run(cli, config, use_color) {
        // Flush file logging before the process exits
        drop(guard);
        exit_with(&e, use_color);
    }
}

/// Print an error and exit with its code
fn exit_with(e: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    if let Some(source) = &config.source {
        tracing::info!(path = %source.display(), "Loaded configuration");
    }

    // Create output writer
    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output),
        Commands::Flatten(args) => handlers::handle_flatten(args, &mut output),
        Commands::Match(args) => handlers::handle_match(args, &mut output),
        Commands::Endpoints(args) => handlers::handle_endpoints(args, &config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<LoggingGuard> {
    // Verbosity first, then the config file, then the environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_settings(&config.logging);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["tally", "flatten", "body.json"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["tally", "-vv", "validate", "body.json", "-e", "login"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["tally", "--quiet", "endpoints"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}

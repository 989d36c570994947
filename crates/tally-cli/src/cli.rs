//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Tally CLI - rule-driven validation of request bodies
///
/// Validates JSON or YAML request bodies against the built-in endpoint rule
/// tables or against tables loaded from rule files, and lets you inspect how
/// a body is flattened and which paths a key pattern selects.
#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a request body against a rule table
    Validate(ValidateArgs),

    /// Print the flattened path registry of a request body
    Flatten(FlattenArgs),

    /// Print the paths of a request body selected by a key pattern
    Match(MatchArgs),

    /// List the known rule tables and their patterns
    Endpoints(EndpointsArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the request body (JSON or YAML)
    #[arg(value_name = "BODY")]
    pub body: PathBuf,

    /// Built-in or configured rule table to validate against
    #[arg(short, long, value_name = "NAME", conflicts_with = "rules")]
    pub endpoint: Option<String>,

    /// Rule file (YAML, JSON or TOML) to load tables from
    #[arg(short, long, value_name = "FILE", requires = "table")]
    pub rules: Option<PathBuf>,

    /// Table to use from the rule file
    #[arg(short, long, value_name = "NAME", requires = "rules")]
    pub table: Option<String>,
}

/// Arguments for the flatten command
#[derive(Args, Debug)]
pub struct FlattenArgs {
    /// Path to the request body (JSON or YAML)
    #[arg(value_name = "BODY")]
    pub body: PathBuf,

    /// Print only the paths, without values
    #[arg(long)]
    pub paths_only: bool,
}

/// Arguments for the match command
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Dotted key pattern, `*` matching exactly one segment
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Path to the request body (JSON or YAML)
    #[arg(value_name = "BODY")]
    pub body: PathBuf,
}

/// Arguments for the endpoints command
#[derive(Args, Debug)]
pub struct EndpointsArgs {
    /// Show the patterns and rules of every table
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show current configuration values
    Show(ConfigShowArgs),

    /// List the locations searched for a configuration file
    Path,
}

/// Arguments for config init
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the configuration file
    #[arg(value_name = "PATH", default_value = ".tally.yaml")]
    pub path: PathBuf,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: OutputFormat::Human,
            no_color: false,
            command: Commands::Flatten(FlattenArgs {
                body: PathBuf::from("body.json"),
                paths_only: false,
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_validate_with_endpoint() {
        let cli = Cli::parse_from(["tally", "validate", "body.json", "--endpoint", "create_voucher"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.endpoint.as_deref(), Some("create_voucher"));
                assert!(args.rules.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rules_requires_table() {
        let result = Cli::try_parse_from(["tally", "validate", "body.json", "--rules", "rules.yaml"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "tally", "validate", "body.json", "--rules", "rules.yaml", "--table", "voucher",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn test_endpoint_conflicts_with_rules() {
        let result = Cli::try_parse_from([
            "tally", "validate", "body.json", "--endpoint", "login", "--rules", "r.yaml", "--table", "t",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_match_arguments() {
        let cli = Cli::parse_from(["tally", "-o", "json", "match", "transactions.*.amount", "body.yaml"]);
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Match(args) => {
                assert_eq!(args.pattern, "transactions.*.amount");
                assert_eq!(args.body, PathBuf::from("body.yaml"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

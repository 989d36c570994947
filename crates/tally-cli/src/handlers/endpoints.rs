//! Endpoints command handler

use super::utils::build_registry;
use crate::cli::{EndpointsArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use serde::Serialize;
use tally_schemas::{RegisteredTable, TableSource};

/// Listing entry for one registered table
#[derive(Debug, Serialize)]
struct TableSummary<'a> {
    name: &'a str,
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
    patterns: Vec<PatternSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct PatternSummary<'a> {
    pattern: &'a str,
    rules: Vec<&'a str>,
}

impl<'a> TableSummary<'a> {
    fn new(name: &'a str, table: &'a RegisteredTable) -> Self {
        let description = match table.source() {
            TableSource::BuiltIn(endpoint) => Some(endpoint.description()),
            _ => None,
        };
        let patterns = table
            .specification()
            .iter()
            .map(|entry| PatternSummary {
                pattern: entry.pattern().as_str(),
                rules: entry.rule_names(),
            })
            .collect();

        Self {
            name,
            source: table.source().to_string(),
            description,
            patterns,
        }
    }
}

/// Handle the endpoints command
pub fn handle_endpoints(args: EndpointsArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let registry = build_registry(config)?;
    let summaries: Vec<TableSummary<'_>> = registry
        .iter()
        .map(|(name, table)| TableSummary::new(name, table))
        .collect();

    if output.format() != OutputFormat::Human {
        return output.data(&summaries);
    }

    output.section(&format!("{} rule table(s)", summaries.len()))?;
    for summary in &summaries {
        let line = match summary.description {
            Some(description) => format!("{:<26} {}", summary.name, description),
            None => format!("{:<26} ({})", summary.name, summary.source),
        };
        output.writeln(&line)?;

        if args.detailed {
            for pattern in &summary.patterns {
                output.writeln(&format!("    {:<28} {}", pattern.pattern, pattern.rules.join("|")))?;
            }
        }
    }

    Ok(())
}

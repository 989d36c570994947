//! Flatten command handler

use super::utils::load_body;
use crate::cli::FlattenArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use serde_json::Value;
use tally_core::DataSet;

/// Handle the flatten command
pub fn handle_flatten(args: FlattenArgs, output: &mut OutputWriter) -> Result<()> {
    let body = load_body(&args.body)?;
    let dataset = DataSet::new(&body);

    output.info(&format!(
        "{} path(s) in {}",
        dataset.len() - 1,
        args.body.display()
    ))?;

    let entries: Vec<(&str, &Value)> = dataset.entries().collect();
    output.entries(&entries, args.paths_only)
}

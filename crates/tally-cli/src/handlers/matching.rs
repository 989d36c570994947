//! Match command handler

use super::utils::load_body;
use crate::cli::MatchArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use tally_core::{DataSet, KeyPattern};

/// Handle the match command
pub fn handle_match(args: MatchArgs, output: &mut OutputWriter) -> Result<()> {
    let pattern = KeyPattern::compile(&args.pattern)?;
    let body = load_body(&args.body)?;
    let dataset = DataSet::new(&body);

    let matches = pattern.matching_entries(&dataset);
    output.info(&format!("{} path(s) match '{}'", matches.len(), pattern))?;
    output.entries(&matches, false)
}

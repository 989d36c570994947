//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod endpoints;
mod flatten;
mod matching;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use endpoints::handle_endpoints;
pub use flatten::handle_flatten;
pub use matching::handle_match;
pub use validate::handle_validate;

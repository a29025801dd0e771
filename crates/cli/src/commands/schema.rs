//! Prints the function-calling schema for the registered tools.

use anyhow::Result;
use review_stats_core::{tool_definitions, AppConfig};

use super::render;

/// Runs the schema command.
///
/// # Errors
/// Returns an error if the schema cannot be serialized.
pub fn run_schema(config: &AppConfig) -> Result<()> {
    println!("{}", render(&tool_definitions(), config.output.pretty)?);
    Ok(())
}

//! Runs a single tool call from the command line.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use review_stats_core::{dispatch, AppConfig};

use super::render;

/// Arguments for the call command.
#[derive(Args, Debug, Clone)]
pub struct CallArgs {
    /// Tool name (see the schema command)
    pub name: String,

    /// JSON argument object, e.g. '{"data": [1, 2, 3]}'
    #[arg(short, long, default_value = "{}")]
    pub args: String,
}

/// Runs the call command.
///
/// # Errors
/// Returns an error if the arguments are not valid JSON or the tool call fails.
pub fn run_call(args: CallArgs, config: &AppConfig) -> Result<()> {
    let arguments: Value =
        serde_json::from_str(&args.args).context("--args is not a valid JSON object")?;

    let content = dispatch(&args.name, &arguments, &config.stats)?;
    println!("{}", render(&content, config.output.pretty)?);

    Ok(())
}

//! CLI commands for the review statistics tools.

pub mod call;
pub mod schema;
pub mod serve;

pub use call::{run_call, CallArgs};
pub use schema::run_schema;
pub use serve::run_serve;

use anyhow::Result;
use serde_json::Value;

/// Serializes JSON for stdout, optionally pretty-printed.
pub(crate) fn render(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

//! JSON-lines tool server.
//!
//! Reads one request per line from stdin and writes one response per line to
//! stdout, so an agent process can keep the tools open across many calls.
//!
//! Request: `{"id": <any>, "name": "<tool>", "arguments": {...} | "<json>"}`
//!
//! Response: `{"id", "name", "content": {...}}` on success, or
//! `{"id", "name", "error": {"kind", "message"}}` on failure.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use review_stats_core::tools::error_content;
use review_stats_core::{AppConfig, StatsConfig, ToolCall};

#[derive(Debug, Deserialize)]
struct ToolRequest {
    #[serde(default)]
    id: Value,
    name: String,
    #[serde(default = "empty_arguments")]
    arguments: Value,
}

fn empty_arguments() -> Value {
    json!({})
}

/// Answers one request line. Never fails: problems are reported in the
/// response's `error` field.
pub fn handle_line(line: &str, config: &StatsConfig) -> Value {
    let request: ToolRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected malformed request: {}", e);
            return json!({
                "id": Value::Null,
                "name": Value::Null,
                "error": { "kind": "invalid_request", "message": e.to_string() },
            });
        }
    };

    let call = match &request.arguments {
        Value::String(raw) => ToolCall::from_json_str(&request.name, raw),
        other => ToolCall::parse(&request.name, other),
    };

    let result = call
        .and_then(|call| call.execute(config))
        .and_then(|output| output.to_json());
    match result {
        Ok(content) => {
            tracing::debug!("Answered {} (id {})", request.name, request.id);
            json!({
                "id": request.id,
                "name": request.name,
                "content": content,
            })
        }
        Err(e) => {
            tracing::warn!("Tool call '{}' failed: {}", request.name, e);
            json!({
                "id": request.id,
                "name": request.name,
                "error": error_content(&e),
            })
        }
    }
}

/// Runs the serve command until stdin closes.
///
/// # Errors
/// Returns an error if stdin cannot be read or stdout cannot be written.
pub async fn run_serve(config: &AppConfig) -> Result<()> {
    tracing::info!("Serving tool calls on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read request")? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&line, &config.stats);
        let mut text = serde_json::to_string(&response)?;
        text.push('\n');
        stdout
            .write_all(text.as_bytes())
            .await
            .context("Failed to write response")?;
        stdout.flush().await?;
        handled += 1;
    }

    tracing::info!("Input closed after {} request(s)", handled);
    Ok(())
}

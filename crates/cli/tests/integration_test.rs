use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{json, Value};

fn review_stats() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_review-stats"));
    command
        .env_remove("REVIEW_STATS_CONFIG")
        .env("RUST_LOG", "error")
        .arg("--config")
        .arg("does-not-exist.toml");
    command
}

#[test]
fn test_schema_lists_all_tools() {
    let output = review_stats().arg("schema").output().expect("Failed to run binary");
    assert!(output.status.success());

    let schema: Value = serde_json::from_slice(&output.stdout).expect("Schema is not JSON");
    let names: Vec<&str> = schema
        .as_array()
        .unwrap()
        .iter()
        .map(|tool| tool["function"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "recalculate_p_value",
            "compute_cohens_d",
            "compute_confidence_interval",
            "describe_group"
        ]
    );
}

#[test]
fn test_call_prints_result() {
    let output = review_stats()
        .args(["call", "describe_group", "--args", r#"{"data": [1, 2, 3, 4, 5]}"#])
        .output()
        .expect("Failed to run binary");
    assert!(output.status.success());

    let content: Value = serde_json::from_slice(&output.stdout).expect("Result is not JSON");
    assert_eq!(content, json!({"mean": 3.0, "std_dev": 1.5811, "n": 5}));
}

#[test]
fn test_call_failure_exits_non_zero() {
    let output = review_stats()
        .args(["call", "compute_confidence_interval", "--args", r#"{"data": [3]}"#])
        .output()
        .expect("Failed to run binary");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("needs at least 2 observations"), "stderr was {stderr}");
}

#[test]
fn test_serve_answers_each_line() {
    let mut child = review_stats()
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn binary");

    {
        let mut stdin = child.stdin.take().unwrap();
        writeln!(
            stdin,
            r#"{{"id": 1, "name": "recalculate_p_value", "arguments": {{"group1": [1, 2, 3, 4, 5], "group2": [6, 7, 8, 9, 10]}}}}"#
        )
        .unwrap();
        writeln!(stdin).unwrap();
        writeln!(stdin, "garbage").unwrap();
        writeln!(
            stdin,
            r#"{{"id": 2, "name": "compute_confidence_interval", "arguments": "{{\"data\": [1, 2, 3, 4, 5], \"confidence\": 0.99}}"}}"#
        )
        .unwrap();
    }

    let output = child.wait_with_output().expect("Serve did not exit");
    assert!(output.status.success());

    let responses: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["content"], json!({"p_value": 0.0011}));
    assert_eq!(responses[1]["error"]["kind"], "invalid_request");
    assert_eq!(responses[2]["id"], 2);
    assert_eq!(
        responses[2]["content"]["confidence_interval"],
        json!([-0.2556, 6.2556])
    );
}

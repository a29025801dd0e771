//! Tool registry and dispatch for function-calling agents.
//!
//! A reviewing model asks for a statistic by tool name with a JSON argument
//! object. This module publishes the schema the model is given, decodes its
//! calls into [`ToolCall`], and runs them against [`crate::statistics`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::StatsConfig;
use crate::error::ToolError;
use crate::statistics::{
    compute_cohens_d, compute_confidence_interval, describe_group, recalculate_p_value, CohensD,
    ConfidenceInterval, GroupDescription, PValue,
};

pub const RECALCULATE_P_VALUE: &str = "recalculate_p_value";
pub const COMPUTE_COHENS_D: &str = "compute_cohens_d";
pub const COMPUTE_CONFIDENCE_INTERVAL: &str = "compute_confidence_interval";
pub const DESCRIBE_GROUP: &str = "describe_group";

/// Registered tool names, in registry order.
pub const TOOL_NAMES: [&str; 4] = [
    RECALCULATE_P_VALUE,
    COMPUTE_COHENS_D,
    COMPUTE_CONFIDENCE_INTERVAL,
    DESCRIBE_GROUP,
];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TwoGroupArgs {
    group1: Vec<f64>,
    group2: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IntervalArgs {
    data: Vec<f64>,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SampleArgs {
    data: Vec<f64>,
}

/// A decoded request for one of the registered tools.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    RecalculatePValue {
        group1: Vec<f64>,
        group2: Vec<f64>,
    },
    ComputeCohensD {
        group1: Vec<f64>,
        group2: Vec<f64>,
    },
    ComputeConfidenceInterval {
        data: Vec<f64>,
        /// Falls back to [`StatsConfig::default_confidence`] when absent
        confidence: Option<f64>,
    },
    DescribeGroup {
        data: Vec<f64>,
    },
}

impl ToolCall {
    /// Decodes a call from a tool name and its argument object.
    ///
    /// # Errors
    /// Returns [`ToolError::UnknownTool`] for an unregistered name and
    /// [`ToolError::InvalidArguments`] when required arguments are missing,
    /// mistyped, or unexpected.
    pub fn parse(name: &str, arguments: &Value) -> Result<Self, ToolError> {
        match name {
            RECALCULATE_P_VALUE => {
                let args: TwoGroupArgs = decode(name, arguments)?;
                Ok(Self::RecalculatePValue {
                    group1: args.group1,
                    group2: args.group2,
                })
            }
            COMPUTE_COHENS_D => {
                let args: TwoGroupArgs = decode(name, arguments)?;
                Ok(Self::ComputeCohensD {
                    group1: args.group1,
                    group2: args.group2,
                })
            }
            COMPUTE_CONFIDENCE_INTERVAL => {
                let args: IntervalArgs = decode(name, arguments)?;
                Ok(Self::ComputeConfidenceInterval {
                    data: args.data,
                    confidence: args.confidence,
                })
            }
            DESCRIBE_GROUP => {
                let args: SampleArgs = decode(name, arguments)?;
                Ok(Self::DescribeGroup { data: args.data })
            }
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }

    /// Decodes a call whose arguments arrive as a raw JSON string, the way
    /// chat-completion APIs deliver them.
    ///
    /// # Errors
    /// Same as [`ToolCall::parse`]; unparseable JSON is reported as
    /// [`ToolError::InvalidArguments`].
    pub fn from_json_str(name: &str, arguments: &str) -> Result<Self, ToolError> {
        if !TOOL_NAMES.contains(&name) {
            return Err(ToolError::UnknownTool(name.to_string()));
        }
        let value: Value =
            serde_json::from_str(arguments).map_err(|e| invalid_arguments(name, &e))?;
        Self::parse(name, &value)
    }

    /// Registered name of this call.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RecalculatePValue { .. } => RECALCULATE_P_VALUE,
            Self::ComputeCohensD { .. } => COMPUTE_COHENS_D,
            Self::ComputeConfidenceInterval { .. } => COMPUTE_CONFIDENCE_INTERVAL,
            Self::DescribeGroup { .. } => DESCRIBE_GROUP,
        }
    }

    /// Runs the statistic.
    ///
    /// # Errors
    /// Returns [`ToolError::Stats`] when the samples are rejected.
    pub fn execute(&self, config: &StatsConfig) -> Result<ToolOutput, ToolError> {
        let output = match self {
            Self::RecalculatePValue { group1, group2 } => {
                ToolOutput::PValue(recalculate_p_value(group1, group2)?)
            }
            Self::ComputeCohensD { group1, group2 } => {
                ToolOutput::CohensD(compute_cohens_d(group1, group2)?)
            }
            Self::ComputeConfidenceInterval { data, confidence } => {
                let confidence = confidence.unwrap_or(config.default_confidence);
                ToolOutput::ConfidenceInterval(compute_confidence_interval(data, confidence)?)
            }
            Self::DescribeGroup { data } => ToolOutput::GroupDescription(describe_group(data)?),
        };
        Ok(output)
    }
}

/// Result of a tool call. Serializes as the bare result struct, so the JSON
/// field names are those of [`PValue`], [`CohensD`], [`ConfidenceInterval`]
/// and [`GroupDescription`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    PValue(PValue),
    CohensD(CohensD),
    ConfidenceInterval(ConfidenceInterval),
    GroupDescription(GroupDescription),
}

impl ToolOutput {
    /// Registered name of the tool that produced this output.
    #[must_use]
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::PValue(_) => RECALCULATE_P_VALUE,
            Self::CohensD(_) => COMPUTE_COHENS_D,
            Self::ConfidenceInterval(_) => COMPUTE_CONFIDENCE_INTERVAL,
            Self::GroupDescription(_) => DESCRIBE_GROUP,
        }
    }

    /// JSON content returned to the model.
    ///
    /// # Errors
    /// Returns [`ToolError::Encoding`] if serialization fails.
    pub fn to_json(&self) -> Result<Value, ToolError> {
        serde_json::to_value(self).map_err(|e| ToolError::Encoding {
            tool: self.tool_name().to_string(),
            message: e.to_string(),
        })
    }
}

/// Decodes and runs one tool call, returning the JSON content for the model.
///
/// # Errors
/// Returns any [`ToolError`] raised while decoding or computing.
///
/// # Examples
/// ```
/// use review_stats_core::config::StatsConfig;
/// use review_stats_core::tools::dispatch;
/// use serde_json::json;
///
/// let content = dispatch(
///     "describe_group",
///     &json!({"data": [1, 2, 3, 4, 5]}),
///     &StatsConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(content, json!({"mean": 3.0, "std_dev": 1.5811, "n": 5}));
/// ```
pub fn dispatch(name: &str, arguments: &Value, config: &StatsConfig) -> Result<Value, ToolError> {
    tracing::debug!("Dispatching tool call: {}", name);

    let result = ToolCall::parse(name, arguments)
        .and_then(|call| call.execute(config))
        .and_then(|output| output.to_json());
    match result {
        Ok(content) => Ok(content),
        Err(e) => {
            tracing::warn!("Tool call '{}' failed: {}", name, e);
            Err(e)
        }
    }
}

/// Structured error content for a failed tool call.
#[must_use]
pub fn error_content(error: &ToolError) -> Value {
    json!({
        "kind": error.kind(),
        "message": error.to_string(),
    })
}

/// Function-calling schema for every registered tool.
#[must_use]
pub fn tool_definitions() -> Value {
    let number_array = json!({ "type": "array", "items": { "type": "number" } });

    json!([
        {
            "type": "function",
            "function": {
                "name": RECALCULATE_P_VALUE,
                "description": "Calculate p-value between two sample groups",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "group1": number_array,
                        "group2": number_array
                    },
                    "required": ["group1", "group2"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": COMPUTE_COHENS_D,
                "description": "Compute effect size (Cohen's d) between two groups",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "group1": number_array,
                        "group2": number_array
                    },
                    "required": ["group1", "group2"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": COMPUTE_CONFIDENCE_INTERVAL,
                "description": "Compute confidence interval for a sample group",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "data": number_array,
                        "confidence": { "type": "number", "default": 0.95 }
                    },
                    "required": ["data"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": DESCRIBE_GROUP,
                "description": "Summarize sample mean, std deviation, and count",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "data": number_array
                    },
                    "required": ["data"]
                }
            }
        }
    ])
}

fn decode<T: DeserializeOwned>(tool: &str, arguments: &Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments.clone()).map_err(|e| invalid_arguments(tool, &e))
}

fn invalid_arguments(tool: &str, error: &serde_json::Error) -> ToolError {
    ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: error.to_string(),
    }
}

//! Typed errors for the statistics tools.

use thiserror::Error;

/// Errors raised when a sample cannot produce the requested statistic.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatsError {
    /// Sample is shorter than the statistic requires.
    #[error("Sample '{name}' needs at least {required} observations, got {actual}")]
    InvalidSampleSize {
        /// Argument name of the offending sample.
        name: &'static str,
        /// Minimum length for the statistic.
        required: usize,
        /// Observed length.
        actual: usize,
    },

    /// Sample contains NaN or an infinity.
    #[error("Sample '{name}' has a non-finite value at index {index}")]
    NonFiniteValue {
        /// Argument name of the offending sample.
        name: &'static str,
        /// Position of the first non-finite value.
        index: usize,
    },

    /// Confidence level is not strictly between 0 and 1.
    #[error("Confidence must be strictly between 0 and 1, got {0}")]
    InvalidConfidence(f64),

    /// Input has a valid size but the statistic divides by zero.
    #[error("Degenerate input: {0}")]
    DegenerateInput(&'static str),

    /// The statistic exists mathematically but falls outside the `f64` range.
    #[error("Result out of floating-point range: {0}")]
    NonFiniteResult(&'static str),
}

impl StatsError {
    /// Stable snake_case identifier for structured error payloads.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSampleSize { .. } => "invalid_sample_size",
            Self::NonFiniteValue { .. } => "non_finite_value",
            Self::InvalidConfidence(_) => "invalid_confidence",
            Self::DegenerateInput(_) => "degenerate_input",
            Self::NonFiniteResult(_) => "non_finite_result",
        }
    }
}

/// Errors raised while resolving or running a tool call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: '{0}'")]
    UnknownTool(String),

    /// The argument payload does not match the tool's schema.
    #[error("Invalid arguments for '{tool}': {message}")]
    InvalidArguments {
        /// Tool the arguments were meant for.
        tool: String,
        /// Deserializer message.
        message: String,
    },

    /// The statistic itself rejected the input.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// The result could not be encoded as JSON.
    #[error("Failed to encode result of '{tool}': {message}")]
    Encoding {
        /// Tool that produced the result.
        tool: String,
        /// Serializer message.
        message: String,
    },
}

impl ToolError {
    /// Stable snake_case identifier for structured error payloads.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::Stats(e) => e.kind(),
            Self::Encoding { .. } => "encoding_failed",
        }
    }
}

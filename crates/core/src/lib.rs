pub mod config;
pub mod config_loader;
pub mod distribution;
pub mod error;
pub mod statistics;
pub mod tools;

pub use config::{AppConfig, OutputConfig, StatsConfig};
pub use config_loader::ConfigLoader;
pub use error::{StatsError, ToolError};
pub use statistics::{
    compute_cohens_d, compute_confidence_interval, describe_group, recalculate_p_value,
    welch_t_test, CohensD, ConfidenceInterval, GroupDescription, PValue, WelchTTest,
    DEFAULT_CONFIDENCE, OUTPUT_DECIMALS,
};
pub use tools::{dispatch, tool_definitions, ToolCall, ToolOutput, TOOL_NAMES};

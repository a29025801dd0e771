use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::statistics::DEFAULT_CONFIDENCE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub stats: StatsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Confidence level used when a tool call omits `confidence`
    pub default_confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON written by the CLI
    pub pretty: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            default_confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl AppConfig {
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns an error if the default confidence is not strictly between 0 and 1.
    pub fn validate(&self) -> Result<()> {
        let confidence = self.stats.default_confidence;
        if !(confidence.is_finite() && confidence > 0.0 && confidence < 1.0) {
            bail!("stats.default_confidence must be strictly between 0 and 1, got {confidence}");
        }
        Ok(())
    }
}

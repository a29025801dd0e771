use crate::config::AppConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/ReviewStats.toml";

/// Prefix for environment overrides; nested keys are separated by `__`,
/// e.g. `REVIEW_STATS_STATS__DEFAULT_CONFIDENCE=0.9`.
pub const ENV_PREFIX: &str = "REVIEW_STATS_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging defaults, the default TOML file, and
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or hold invalid values.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration from a specific TOML file. A missing file leaves
    /// the defaults in place.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or hold invalid values.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file(path.with_extension("json")))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        config.validate()?;
        tracing::debug!("Loaded config from {}: {:?}", path.display(), config);

        Ok(config)
    }
}

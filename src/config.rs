//! Run configuration: the engine's `[field]`, `[soil]` and `[initial]`
//! tables plus a `[scenario]` table for the synthetic driver.

use crate::scenario::ScenarioConfig;
use anyhow::{Context, Result};
use humus_core::config::AppConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RunConfig {
    #[serde(flatten)]
    pub engine: AppConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

impl RunConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse run configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, or defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        self.scenario
            .validate()
            .context("Invalid [scenario] table")?;
        Ok(())
    }
}

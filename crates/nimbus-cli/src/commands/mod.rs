pub mod analyze;
pub mod batch;
pub mod config;
pub mod record;

use std::path::Path;

use anyhow::{Context, Result};
use nimbus_core::pipeline::config::PipelineConfig;
use tracing::debug;

/// Read a TOML pipeline config, or fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: PipelineConfig = toml::from_str(&contents).context("Invalid pipeline config")?;
    debug!(path = %path.display(), "Loaded pipeline config");
    Ok(config)
}

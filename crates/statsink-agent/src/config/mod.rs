//! Loads the agent's YAML config (http, stats, optional sink sections),
//! rejecting unknown fields and validating ranges before anything starts.

pub mod schema;

use std::fs;

use statsink_core::error::{Result, StatsError};

pub use schema::{AgentConfig, HttpSection, SinkConfig, StatsConfig};

pub fn load_from_file(path: &str) -> Result<AgentConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| StatsError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| StatsError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

use serde::Deserialize;
use statsink_core::error::{Result, StatsError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default)]
    pub http: HttpSection,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub sink: Option<SinkConfig>,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(StatsError::UnsupportedVersion);
        }

        self.stats.validate()?;
        if let Some(sink) = &self.sink {
            sink.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Aggregator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    /// Request queue capacity (0 is promoted to 1).
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Root path for the JSON snapshot and prefix for sink event names.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Keep a JSON snapshot available to `get_stats`.
    #[serde(default = "default_retain_internal")]
    pub retain_internal: bool,

    #[serde(default = "default_push_interval_ms")]
    pub push_interval_ms: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            prefix: default_prefix(),
            retain_internal: default_retain_internal(),
            push_interval_ms: default_push_interval_ms(),
        }
    }
}

impl StatsConfig {
    pub fn validate(&self) -> Result<()> {
        if !(10..=3_600_000).contains(&self.push_interval_ms) {
            return Err(StatsError::BadConfig(
                "stats.push_interval_ms must be between 10 and 3600000".into(),
            ));
        }
        Ok(())
    }
}

/// Sink client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkConfig {
    #[serde(default)]
    pub address: String,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl SinkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.address.is_empty() {
            return Err(StatsError::EmptyAddress);
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9090".into()
}
fn default_queue_capacity() -> usize {
    100
}
fn default_prefix() -> String {
    "service".into()
}
fn default_retain_internal() -> bool {
    true
}
fn default_push_interval_ms() -> u64 {
    1000
}

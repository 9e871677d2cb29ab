//! Sink event shape (transport-agnostic).

use serde::Serialize;

/// Tag attached to every event produced from a tracked stat.
pub const STAT_TAG: &str = "stat";

/// Numeric payload of an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventMetric {
    Int(i64),
    Float(f64),
}

/// One monitoring event, as accepted by an event sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub service: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub metric: EventMetric,
    pub tags: Vec<String>,
    /// Time-to-live in seconds.
    pub ttl: f32,
}

impl Event {
    /// Event for a tracked stat: tagged [`STAT_TAG`], no state/description.
    pub fn stat(service: impl Into<String>, metric: EventMetric, ttl: f32) -> Self {
        Self {
            service: service.into(),
            state: String::new(),
            description: String::new(),
            metric,
            tags: vec![STAT_TAG.to_string()],
            ttl,
        }
    }
}

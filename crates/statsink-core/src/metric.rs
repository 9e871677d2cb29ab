//! Metric value model.
//!
//! Counters are always `i64`; gauges and timings are always `f64` (timings in
//! seconds). A name's kind is whatever its last write established.

use serde_json::{Number, Value};

use crate::event::EventMetric;

/// Kind tag for absolute writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Timing,
}

/// Current value of one tracked metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Counter(i64),
    Gauge(f64),
    /// Duration in seconds.
    Timing(f64),
}

impl MetricValue {
    /// Build an absolute value of the given kind.
    ///
    /// `Counter` truncates toward zero; absolute counter writes only come from
    /// internal bookkeeping.
    pub fn absolute(kind: MetricKind, value: f64) -> Self {
        match kind {
            MetricKind::Counter => MetricValue::Counter(value as i64),
            MetricKind::Gauge => MetricValue::Gauge(value),
            MetricKind::Timing => MetricValue::Timing(value),
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Counter(_) => MetricKind::Counter,
            MetricValue::Gauge(_) => MetricKind::Gauge,
            MetricValue::Timing(_) => MetricKind::Timing,
        }
    }

    /// Integer view used by counter updates.
    ///
    /// Anything that is not a counter reads as 0: a name that switches from
    /// gauge to counter restarts from zero instead of failing.
    pub fn counter_or_zero(value: Option<&MetricValue>) -> i64 {
        match value {
            Some(MetricValue::Counter(n)) => *n,
            _ => 0,
        }
    }

    /// JSON rendering for snapshots.
    ///
    /// Timings render as a seconds-suffixed string (`"0.25s"`). Non-finite
    /// gauges have no JSON number form and render as `null`.
    pub fn to_json(&self) -> Value {
        match self {
            MetricValue::Counter(n) => Value::from(*n),
            MetricValue::Gauge(v) => Number::from_f64(*v).map(Value::Number).unwrap_or(Value::Null),
            MetricValue::Timing(v) => Value::String(format!("{v}s")),
        }
    }

    /// Numeric payload for sink events.
    pub fn to_event_metric(&self) -> EventMetric {
        match self {
            MetricValue::Counter(n) => EventMetric::Int(*n),
            MetricValue::Gauge(v) | MetricValue::Timing(v) => EventMetric::Float(*v),
        }
    }
}

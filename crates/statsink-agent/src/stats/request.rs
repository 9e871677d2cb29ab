use tokio::sync::oneshot;

use statsink_core::error::Result;
use statsink_core::MetricKind;

/// Unit of work for the stats loop. Applied strictly in queue order.
pub enum Request {
    /// Additive counter update (negative for decrements).
    Increment { name: String, delta: i64 },
    /// Absolute write; the stored kind follows `kind`.
    SetAbsolute {
        name: String,
        value: f64,
        kind: MetricKind,
    },
    /// Render the JSON snapshot (or report that retention is off).
    Snapshot { reply: oneshot::Sender<Result<String>> },
    /// Run one push cycle now; replies with the number of events handed to the sink.
    Flush { reply: oneshot::Sender<usize> },
}

impl Request {
    /// Target metric for mutations.
    pub fn metric_name(&self) -> Option<&str> {
        match self {
            Request::Increment { name, .. } | Request::SetAbsolute { name, .. } => {
                Some(name.as_str())
            }
            Request::Snapshot { .. } | Request::Flush { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Request::Increment { .. } => "increment",
            Request::SetAbsolute { .. } => "set_absolute",
            Request::Snapshot { .. } => "snapshot",
            Request::Flush { .. } => "flush",
        }
    }
}

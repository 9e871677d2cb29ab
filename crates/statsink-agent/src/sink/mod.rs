//! Event sink capability.
//!
//! A sink accepts single events or batches, best-effort. Implementations must
//! not block the caller: the stats loop calls into the sink inline and any
//! transport failure has to stay on the sink's side of the boundary.

mod client;

pub use client::SinkClient;

use std::sync::{Arc, RwLock};

use statsink_core::Event;

pub trait EventSink: Send + Sync {
    /// Submit one event. Fire-and-forget.
    fn send_event(&self, event: Event);

    /// Submit a batch of events in one call. Fire-and-forget.
    fn send_events(&self, events: Vec<Event>);
}

/// Optional sink reference shared between the stats façade (attach/detach)
/// and the stats loop (reads once per push cycle).
#[derive(Default)]
pub(crate) struct SinkSlot {
    inner: RwLock<Option<Arc<dyn EventSink>>>,
}

impl SinkSlot {
    pub(crate) fn attach(&self, sink: Arc<dyn EventSink>) {
        if let Ok(mut g) = self.inner.write() {
            *g = Some(sink);
        }
    }

    /// Drop our reference. The sink itself stays open for other owners.
    pub(crate) fn detach(&self) {
        if let Ok(mut g) = self.inner.write() {
            *g = None;
        }
    }

    pub(crate) fn current(&self) -> Option<Arc<dyn EventSink>> {
        self.inner.read().ok().and_then(|g| g.clone())
    }
}

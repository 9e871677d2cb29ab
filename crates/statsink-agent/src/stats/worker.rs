//! Stats loop: the single owner of the metric store.
//!
//! One task waits on the request queue and the push timer with one
//! `tokio::select!`. Whichever fires first runs to completion before the next
//! wait, so a push never overlaps a request and every mutation is applied by
//! exactly one writer.
//!
//! ```text
//! producer ──┐
//! producer ──┤──► mpsc (bounded) ──► StatsWorker ──► MetricStore
//! producer ──┘                           │
//!                         push timer ────┘──► EventSink (batch)
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

use statsink_core::error::StatsError;
use statsink_core::MetricValue;

use crate::sink::SinkSlot;
use crate::stats::request::Request;
use crate::stats::store::{stat_event, MetricStore};

pub(crate) struct StatsWorker {
    rx: mpsc::Receiver<Request>,
    store: MetricStore,
    sink: Arc<SinkSlot>,
    prefix: String,
    retain: bool,
    push_every: Duration,
    ttl: f32,
    started: Instant,
}

impl StatsWorker {
    pub(crate) fn new(
        rx: mpsc::Receiver<Request>,
        sink: Arc<SinkSlot>,
        prefix: String,
        retain: bool,
        push_every: Duration,
    ) -> Self {
        Self {
            rx,
            store: MetricStore::new(),
            sink,
            prefix,
            retain,
            push_every,
            ttl: push_every.as_secs_f32() * 2.0,
            started: Instant::now(),
        }
    }

    /// Run until the queue is closed and drained. No final push on exit.
    pub(crate) async fn run(mut self) {
        tracing::debug!(
            prefix = %self.prefix,
            push_ms = self.push_every.as_millis() as u64,
            retain = self.retain,
            "stats loop started"
        );

        let push = tokio::time::sleep(self.push_every);
        tokio::pin!(push);

        loop {
            tokio::select! {
                maybe_req = self.rx.recv() => {
                    match maybe_req {
                        Some(req) => self.handle(req),
                        None => break,
                    }
                }

                () = &mut push => {
                    self.push();
                    push.as_mut().reset(Instant::now() + self.push_every);
                }
            }
        }

        tracing::debug!(metrics = self.store.len(), "stats loop stopped");
    }

    fn handle(&mut self, req: Request) {
        tracing::trace!(kind = req.kind(), "stats request");

        match req {
            Request::Increment { name, delta } => {
                self.store.increment(&name, delta);
            }
            Request::SetAbsolute { name, value, kind } => {
                let value = MetricValue::absolute(kind, value);
                self.store.set(&name, value);
                // point-in-time values go out right away as well
                if let Some(sink) = self.sink.current() {
                    sink.send_event(stat_event(&self.prefix, &name, &value, self.ttl));
                }
            }
            Request::Snapshot { reply } => {
                let res = if self.retain {
                    self.refresh_internals();
                    Ok(self.store.snapshot(&self.prefix).to_json_string())
                } else {
                    Err(StatsError::NotTracked)
                };
                // receiver is gone if the caller timed out
                let _ = reply.send(res);
            }
            Request::Flush { reply } => {
                let sent = self.push();
                let _ = reply.send(sent);
            }
        }
    }

    /// One push cycle. Returns the number of events handed to the sink.
    fn push(&mut self) -> usize {
        self.refresh_internals();

        let Some(sink) = self.sink.current() else {
            return 0;
        };
        let events = self.store.to_events(&self.prefix, self.ttl);
        let n = events.len();
        sink.send_events(events);
        tracing::trace!(events = n, "stats pushed");
        n
    }

    fn refresh_internals(&mut self) {
        let uptime = self.started.elapsed().as_secs_f64();
        let live_tasks = tokio::runtime::Handle::try_current()
            .map(|h| h.metrics().num_alive_tasks())
            .unwrap_or(0);
        self.store.refresh_internals(uptime, live_tasks);
    }
}

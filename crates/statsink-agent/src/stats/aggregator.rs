use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Duration;

use statsink_core::error::{Result, StatsError};
use statsink_core::MetricKind;

use crate::config::StatsConfig;
use crate::sink::{EventSink, SinkSlot};
use crate::stats::request::Request;
use crate::stats::worker::StatsWorker;

/// Counter bumped by every `get_stats` call.
pub const STATS_REQUESTS: &str = "stats.requests";

/// Stats aggregator façade.
///
/// Producers only ever enqueue requests; the store lives inside the stats
/// loop task. Mutations are fire-and-forget and silently dropped once the
/// aggregator is closed. Must be created inside a tokio runtime.
pub struct Stats {
    tx: RwLock<Option<mpsc::Sender<Request>>>,
    sink: Arc<SinkSlot>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Stats {
    pub fn new(config: StatsConfig) -> Self {
        if config.queue_capacity == 0 {
            tracing::debug!("stats.queue_capacity 0 promoted to 1");
        }
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let sink = Arc::new(SinkSlot::default());

        let worker = StatsWorker::new(
            rx,
            Arc::clone(&sink),
            config.prefix,
            config.retain_internal,
            Duration::from_millis(config.push_interval_ms),
        );
        let handle = tokio::spawn(worker.run());

        Self {
            tx: RwLock::new(Some(tx)),
            sink,
            worker: Mutex::new(Some(handle)),
        }
    }

    /// Attach a sink for periodic pushes. `None` is rejected and leaves the
    /// current attachment untouched.
    pub fn use_sink(&self, sink: Option<Arc<dyn EventSink>>) -> Result<()> {
        let sink = sink.ok_or(StatsError::SinkMissing)?;
        self.sink.attach(sink);
        Ok(())
    }

    /// Stop accepting requests and detach the sink (without closing it).
    ///
    /// Queued requests are still applied; the loop exits once they drain.
    /// Calling again is a no-op.
    pub fn close(&self) {
        let tx = self.tx.write().ok().and_then(|mut g| g.take());
        if tx.is_some() {
            tracing::debug!("stats closed");
        }
        drop(tx);
        self.sink.detach();
    }

    pub fn is_closed(&self) -> bool {
        self.sender().is_none()
    }

    /// Wait for the stats loop to finish. Only returns after `close`.
    pub async fn closed(&self) {
        let handle = self.worker.lock().ok().and_then(|mut g| g.take());
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "stats loop ended abnormally");
            }
        }
    }

    pub async fn incr(&self, name: &str, delta: i64) {
        self.submit(Request::Increment {
            name: name.to_string(),
            delta,
        })
        .await;
    }

    pub async fn decr(&self, name: &str, delta: i64) {
        self.submit(Request::Increment {
            name: name.to_string(),
            delta: delta.saturating_neg(),
        })
        .await;
    }

    pub async fn gauge(&self, name: &str, value: f64) {
        self.submit(Request::SetAbsolute {
            name: name.to_string(),
            value,
            kind: MetricKind::Gauge,
        })
        .await;
    }

    /// Record a duration in seconds.
    pub async fn timing(&self, name: &str, seconds: f64) {
        self.submit(Request::SetAbsolute {
            name: name.to_string(),
            value: seconds,
            kind: MetricKind::Timing,
        })
        .await;
    }

    pub async fn timing_duration(&self, name: &str, d: Duration) {
        self.timing(name, d.as_secs_f64()).await;
    }

    /// JSON snapshot of every tracked stat.
    ///
    /// Bumps `stats.requests` and refreshes `uptime`/`tasks` first. The whole
    /// call, enqueueing included, is bounded by `timeout`.
    pub async fn get_stats(&self, timeout: Duration) -> Result<String> {
        let tx = self.sender().ok_or(StatsError::Closed)?;

        let read = async move {
            tx.send(Request::Increment {
                name: STATS_REQUESTS.to_string(),
                delta: 1,
            })
            .await
            .map_err(|_| StatsError::Closed)?;

            let (reply, rx) = oneshot::channel();
            tx.send(Request::Snapshot { reply })
                .await
                .map_err(|_| StatsError::Closed)?;
            rx.await.map_err(|_| StatsError::Closed)?
        };

        tokio::time::timeout(timeout, read)
            .await
            .map_err(|_| StatsError::TimedOut)?
    }

    /// Run a push cycle now instead of waiting for the timer. Returns the
    /// number of events handed to the sink (0 when none is attached).
    pub async fn flush(&self, timeout: Duration) -> Result<usize> {
        let tx = self.sender().ok_or(StatsError::Closed)?;

        let run = async move {
            let (reply, rx) = oneshot::channel();
            tx.send(Request::Flush { reply })
                .await
                .map_err(|_| StatsError::Closed)?;
            rx.await.map_err(|_| StatsError::Closed)
        };

        tokio::time::timeout(timeout, run)
            .await
            .map_err(|_| StatsError::TimedOut)?
    }

    fn sender(&self) -> Option<mpsc::Sender<Request>> {
        self.tx.read().ok().and_then(|g| g.clone())
    }

    async fn submit(&self, req: Request) {
        if req.metric_name().is_some_and(str::is_empty) {
            tracing::warn!(kind = req.kind(), "empty stat name, dropping");
            return;
        }
        let Some(tx) = self.sender() else { return };
        // the loop only drops its receiver after close, so a failed send is a late write
        let _ = tx.send(req).await;
    }
}

impl Drop for Stats {
    fn drop(&mut self) {
        self.close();
    }
}

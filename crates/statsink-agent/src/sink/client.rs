//! TCP sink client.
//!
//! Events are written as newline-delimited JSON by a dedicated writer task.
//! Callers only ever `try_send` into the writer queue: when it is full the
//! events are dropped and a warning is logged.

use std::sync::Mutex;

use bytes::{BufMut, BytesMut};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use statsink_core::error::{Result, StatsError};
use statsink_core::Event;

use crate::config::SinkConfig;
use crate::sink::EventSink;

enum Job {
    One(Event),
    Batch(Vec<Event>),
}

pub struct SinkClient {
    address: String,
    tx: Mutex<Option<mpsc::Sender<Job>>>,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl SinkClient {
    /// Connect to the configured address and start the writer task.
    pub async fn connect(config: SinkConfig) -> Result<Self> {
        if config.address.is_empty() {
            return Err(StatsError::EmptyAddress);
        }

        let stream = TcpStream::connect(&config.address)
            .await
            .map_err(StatsError::Connect)?;

        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let writer = tokio::spawn(write_loop(stream, rx, config.address.clone()));

        tracing::info!(address = %config.address, "sink client connected");

        Ok(Self {
            address: config.address,
            tx: Mutex::new(Some(tx)),
            writer: Mutex::new(Some(writer)),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn enqueue(&self, job: Job) {
        let Ok(guard) = self.tx.lock() else { return };
        let Some(tx) = guard.as_ref() else { return };

        match tx.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(address = %self.address, "sink queue full, dropping events");
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(address = %self.address, "sink writer gone, dropping events");
            }
        }
    }

    /// Stop accepting events, let the writer drain its queue, then shut the
    /// connection down. Later calls are no-ops.
    pub async fn close(&self) {
        let tx = self.tx.lock().ok().and_then(|mut g| g.take());
        drop(tx);

        let writer = self.writer.lock().ok().and_then(|mut g| g.take());
        if let Some(writer) = writer {
            if let Err(e) = writer.await {
                tracing::warn!(address = %self.address, error = %e, "sink writer ended abnormally");
            }
            tracing::info!(address = %self.address, "sink client closed");
        }
    }
}

impl EventSink for SinkClient {
    fn send_event(&self, event: Event) {
        self.enqueue(Job::One(event));
    }

    fn send_events(&self, events: Vec<Event>) {
        if events.is_empty() {
            return;
        }
        self.enqueue(Job::Batch(events));
    }
}

async fn write_loop(mut stream: TcpStream, mut rx: mpsc::Receiver<Job>, address: String) {
    let mut buf = BytesMut::with_capacity(4096);

    while let Some(job) = rx.recv().await {
        buf.clear();
        match job {
            Job::One(ev) => encode_line(&ev, &mut buf),
            Job::Batch(evs) => evs.iter().for_each(|ev| encode_line(ev, &mut buf)),
        }
        if buf.is_empty() {
            continue;
        }

        if let Err(e) = stream.write_all(&buf).await {
            tracing::warn!(%address, error = %e, "sink write failed, writer stopping");
            return;
        }
    }

    let _ = stream.shutdown().await;
}

fn encode_line(ev: &Event, buf: &mut BytesMut) {
    match serde_json::to_vec(ev) {
        Ok(line) => {
            buf.put_slice(&line);
            buf.put_u8(b'\n');
        }
        Err(e) => tracing::warn!(service = %ev.service, error = %e, "event encode failed"),
    }
}

//! Test doubles shared by agent integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{mpsc, Mutex};

use statsink_agent::EventSink;
use statsink_core::Event;

/// Records everything it is handed.
#[derive(Default)]
pub struct RecordingSink {
    singles: Mutex<Vec<Event>>,
    batches: Mutex<Vec<Vec<Event>>>,
}

impl RecordingSink {
    pub fn singles(&self) -> Vec<Event> {
        self.singles.lock().unwrap().clone()
    }

    pub fn batches(&self) -> Vec<Vec<Event>> {
        self.batches.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn send_event(&self, event: Event) {
        self.singles.lock().unwrap().push(event);
    }

    fn send_events(&self, events: Vec<Event>) {
        self.batches.lock().unwrap().push(events);
    }
}

/// Blocks the calling thread inside `send_event` until released. Used to
/// hold the stats loop busy.
pub struct GateSink {
    release: Mutex<mpsc::Receiver<()>>,
}

impl GateSink {
    pub fn new() -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                release: Mutex::new(rx),
            },
            tx,
        )
    }
}

impl EventSink for GateSink {
    fn send_event(&self, _event: Event) {
        let _ = self.release.lock().unwrap().recv();
    }

    fn send_events(&self, _events: Vec<Event>) {}
}

pub fn find<'a>(events: &'a [Event], service: &str) -> Option<&'a Event> {
    events.iter().find(|e| e.service == service)
}

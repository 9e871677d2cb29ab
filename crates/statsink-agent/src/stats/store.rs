//! Authoritative name -> value mapping.
//!
//! Only the stats loop owns a `MetricStore`; nothing here is synchronized.

use std::collections::HashMap;

use statsink_core::{Event, MetricValue, SnapshotTree};

/// Derived metric: seconds since the aggregator was created (timing).
pub const UPTIME: &str = "uptime";
/// Derived metric: live tasks on the current tokio runtime (gauge).
pub const TASKS: &str = "tasks";

#[derive(Debug, Clone, Copy)]
struct Slot {
    value: MetricValue,
    /// Write sequence; the snapshot replays names in this order.
    seq: u64,
}

#[derive(Debug, Default)]
pub struct MetricStore {
    values: HashMap<String, Slot>,
    next_seq: u64,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.values.get(name).map(|slot| &slot.value)
    }

    /// Add `delta` to a counter and return the new total.
    ///
    /// A missing name or one currently holding a gauge/timing starts from 0.
    pub fn increment(&mut self, name: &str, delta: i64) -> i64 {
        let total = MetricValue::counter_or_zero(self.get(name)).saturating_add(delta);
        self.set(name, MetricValue::Counter(total));
        total
    }

    /// Overwrite unconditionally.
    pub fn set(&mut self, name: &str, value: MetricValue) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.values.insert(name.to_string(), Slot { value, seq });
    }

    pub fn refresh_internals(&mut self, uptime_secs: f64, live_tasks: usize) {
        self.set(UPTIME, MetricValue::Timing(uptime_secs));
        self.set(TASKS, MetricValue::Gauge(live_tasks as f64));
    }

    /// Entries sorted by name, so event batches are deterministic.
    pub fn sorted(&self) -> Vec<(&str, &MetricValue)> {
        let mut entries: Vec<(&str, &MetricValue)> = self
            .values
            .iter()
            .map(|(k, slot)| (k.as_str(), &slot.value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Nested JSON tree rooted at `prefix`.
    ///
    /// Names are replayed in the order of their latest write, so when paths
    /// overlap (`a` and `a.b`) the most recent write wins.
    pub fn snapshot(&self, prefix: &str) -> SnapshotTree {
        let mut entries: Vec<(&str, &Slot)> =
            self.values.iter().map(|(k, slot)| (k.as_str(), slot)).collect();
        entries.sort_by_key(|(_, slot)| slot.seq);

        let mut tree = SnapshotTree::with_root(prefix);
        for (name, slot) in entries {
            tree.set_path(slot.value.to_json(), &qualified(prefix, name));
        }
        tree
    }

    /// One stat event per tracked metric.
    pub fn to_events(&self, prefix: &str, ttl: f32) -> Vec<Event> {
        self.sorted()
            .into_iter()
            .map(|(name, value)| stat_event(prefix, name, value, ttl))
            .collect()
    }
}

/// `prefix.name`, or just `name` when there is no prefix.
pub fn qualified(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

pub fn stat_event(prefix: &str, name: &str, value: &MetricValue, ttl: f32) -> Event {
    Event::stat(qualified(prefix, name), value.to_event_metric(), ttl)
}

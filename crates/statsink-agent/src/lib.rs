//! statsink agent library entry.
//!
//! This crate wires the stats aggregator, the event sink client, config
//! loading, and the ops HTTP surface together. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;
pub mod sink;
pub mod stats;

pub use sink::{EventSink, SinkClient};
pub use stats::Stats;

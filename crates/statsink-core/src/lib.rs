//! statsink core: runtime-free metric primitives, sink events, the snapshot
//! tree, and the shared error type.
//!
//! This crate carries no async runtime so the value model can be reused by
//! the agent, by tests, and by anything that wants to render or ship stats
//! without pulling in tokio.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod metric;
pub mod snapshot;

/// Shared result type.
pub use error::{ErrorCode, Result, StatsError};
pub use event::{Event, EventMetric, STAT_TAG};
pub use metric::{MetricKind, MetricValue};
pub use snapshot::SnapshotTree;

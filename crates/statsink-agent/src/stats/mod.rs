//! Stats aggregation: request protocol, metric store, the single-writer loop,
//! and the public façade.

mod aggregator;
mod request;
mod store;
mod worker;

pub use aggregator::{Stats, STATS_REQUESTS};
pub use store::{qualified, MetricStore, TASKS, UPTIME};

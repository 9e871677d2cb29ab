//! Shared application state for the statsink agent.
//!
//! Owns the aggregator and, when configured, the sink client. The client is
//! closed here (its creator), never by the aggregator that merely uses it.

use std::sync::Arc;

use statsink_core::error::Result;

use crate::config::AgentConfig;
use crate::sink::{EventSink, SinkClient};
use crate::stats::Stats;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AgentConfig,
    stats: Arc<Stats>,
    sink: Option<Arc<SinkClient>>,
}

impl AppState {
    /// Build application state: start the stats loop, connect and attach
    /// the sink if one is configured.
    pub async fn new(cfg: AgentConfig) -> Result<Self> {
        let stats = Arc::new(Stats::new(cfg.stats.clone()));

        let sink = match &cfg.sink {
            Some(sink_cfg) => {
                let client = Arc::new(SinkClient::connect(sink_cfg.clone()).await?);
                stats.use_sink(Some(Arc::clone(&client) as Arc<dyn EventSink>))?;
                tracing::info!(address = %client.address(), "sink attached to stats");
                Some(client)
            }
            None => {
                tracing::info!("no sink configured, stats are only served over http");
                None
            }
        };

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, stats, sink }),
        })
    }

    pub fn cfg(&self) -> &AgentConfig {
        &self.inner.cfg
    }

    pub fn stats(&self) -> Arc<Stats> {
        Arc::clone(&self.inner.stats)
    }

    /// Close the aggregator, wait for its loop, then close the sink client.
    pub async fn shutdown(&self) {
        self.inner.stats.close();
        self.inner.stats.closed().await;
        if let Some(sink) = &self.inner.sink {
            sink.close().await;
        }
    }
}

//! statsink agent
//!
//! - Loads `statsink.yaml` (or the path given as the first argument)
//! - Starts the stats loop and, if configured, the sink client
//! - Serves `/healthz`, `/stats`, `/flush`
//! - On Ctrl-C: close stats, then the sink client

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use statsink_agent::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.code().as_str(), "statsink-agent failed");
        std::process::exit(1);
    }
}

async fn run() -> statsink_core::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "statsink.yaml".to_string());
    let cfg = config::load_from_file(&path)?;

    let state = AppState::new(cfg).await?;
    let listen: SocketAddr = state.cfg().http.listen.parse().map_err(|e| {
        statsink_core::StatsError::BadConfig(format!("http.listen must be a valid SocketAddr: {e}"))
    })?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "statsink-agent starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| statsink_core::StatsError::Internal(format!("bind failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
        })
        .await
        .map_err(|e| statsink_core::StatsError::Internal(format!("server failed: {e}")))?;

    state.shutdown().await;
    tracing::info!("statsink-agent stopped");
    Ok(())
}

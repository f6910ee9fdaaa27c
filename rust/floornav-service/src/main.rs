use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use floornav_service::{build_router, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cfg = Config::from_env()?;
    let state = AppState::new(cfg.graph_path.clone(), cfg.options.clone());
    if cfg.graph_path.is_some() {
        // A broken document should not keep the service down; /admin/reload retries.
        if let Err(e) = state.reload_from_disk() {
            error!(error = %format!("{e:#}"), "initial graph load failed");
        }
    }

    let addr = cfg.addr()?;
    let app = build_router(state);
    info!(core_version = %floornav_core::version(), addr = %addr, "starting floornav-service");
    let listener = tokio::net::TcpListener::bind(addr).await.context("bind failed")?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

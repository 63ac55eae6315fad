//! TrimGo API Server
//!
//! Run with: cargo run --bin trimgo-api
//!
//! # Configuration
//!
//! Read from `TRIMGO_CONFIG` if set, otherwise from the default locations
//! (`~/.config/trimgo/config.toml`, `/etc/trimgo/config.toml`,
//! `./config.toml`). Environment overrides:
//! - `TRIMGO_API_HOST`, `TRIMGO_API_PORT`
//! - `TRIMGO_SERVICE_MINUTES`
//! - `TRIMGO_TICKET_TICK_MS`, `TRIMGO_CLOCK_TICK_MS`
//! - `TRIMGO_LOG_LEVEL`, `TRIMGO_LOG_FORMAT`
//! - `RUST_LOG`: Overrides the log filter entirely

use anyhow::Context;
use std::path::PathBuf;
use trimgo::api::{serve, AppState};
use trimgo::config::Config;
use trimgo::logging::init_tracing;
use trimgo::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("TRIMGO_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            Config::load_with_env(&path)
                .with_context(|| format!("loading config from {}", path.display()))?
        }
        Err(_) => Config::load_default(),
    };

    init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    tracing::info!("Starting TrimGo API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        service_minutes = config.queue.service_minutes,
        ticket_tick_ms = config.timers.ticket_tick_ms,
        clock_tick_ms = config.timers.clock_tick_ms,
        "Queue settings"
    );

    let session = Session::new(config.session_settings());
    tracing::info!(salons = session.salons().len(), "Seed data loaded");

    let state = AppState::new(session, config.api.clone(), config.timer_settings());
    serve(state, &config.api).await?;

    Ok(())
}

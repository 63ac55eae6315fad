//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use std::time::Duration;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// How long readiness waits for the session lock
const READY_LOCK_TIMEOUT: Duration = Duration::from_millis(500);

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the session can be read.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if session_available(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with session details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (view, salons) = {
        let session = state.session.read().await;
        (session.view(), session.salons().len())
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        view,
        salons,
        ws_connections: state.ws_connection_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// A session stuck behind a writer counts as unavailable
async fn session_available(state: &AppState) -> bool {
    tokio::time::timeout(READY_LOCK_TIMEOUT, state.session.read())
        .await
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}

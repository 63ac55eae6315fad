//! View Routes
//!
//! - GET /api/v1/view - Current view
//! - PUT /api/v1/view - Navigate
//! - POST /api/v1/logout - Leave the profile and return home

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{SetViewRequest, ViewResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::session::View;

/// GET /api/v1/view
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<ViewResponse> {
    let session = state.session.read().await;
    Json(ViewResponse {
        view: session.view(),
        ticket_visible: session.ticket_visible(),
    })
}

/// PUT /api/v1/view
///
/// Switches screens and swaps the display timers to the new view's set.
pub async fn set_view(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetViewRequest>,
) -> ApiResult<Json<ViewResponse>> {
    let view: View = req.view.parse()?;

    let ticket_visible = {
        let mut session = state.session.write().await;
        session.navigate(view);
        session.ticket_visible()
    };
    state.sync_timers().await;

    Ok(Json(ViewResponse {
        view,
        ticket_visible,
    }))
}

/// POST /api/v1/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> Json<ViewResponse> {
    let (view, ticket_visible) = {
        let mut session = state.session.write().await;
        session.logout(Utc::now());
        (session.view(), session.ticket_visible())
    };

    tracing::info!("Logged out");

    state.sync_timers().await;
    state.publish_toast().await;

    Json(ViewResponse {
        view,
        ticket_visible,
    })
}

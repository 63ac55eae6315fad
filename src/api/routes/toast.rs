//! Toast Routes
//!
//! - GET /api/v1/toast - Current toast, or null once it has timed out
//! - DELETE /api/v1/toast - Dismiss it early

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::state::AppState;
use crate::session::Toast;

/// GET /api/v1/toast
pub async fn get_toast(State(state): State<Arc<AppState>>) -> Json<Option<Toast>> {
    let session = state.session.read().await;
    Json(session.current_toast(Utc::now()).cloned())
}

/// DELETE /api/v1/toast
pub async fn dismiss_toast(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.write().await.dismiss_toast();
    StatusCode::NO_CONTENT
}

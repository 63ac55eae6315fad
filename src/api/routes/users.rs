//! User Routes
//!
//! - GET /api/v1/users - List registered users
//! - POST /api/v1/users - Register a user

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{RegisterUserRequest, UserListResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::salon::UserData;

/// GET /api/v1/users
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<UserListResponse> {
    let users = state.session.read().await.users().to_vec();
    Json(UserListResponse {
        total: users.len(),
        users,
    })
}

/// POST /api/v1/users
///
/// Creates the account and opens the customer dashboard.
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterUserRequest>,
) -> ApiResult<(StatusCode, Json<UserData>)> {
    let user = state
        .session
        .write()
        .await
        .register_user(&req.name, Utc::now())
        .clone();

    state.sync_timers().await;
    state.publish_toast().await;

    Ok((StatusCode::CREATED, Json(user)))
}

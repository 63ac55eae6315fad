//! Salon Dashboard Routes
//!
//! Operator actions on the request list, waiting queue and chair. Each
//! change is pushed to `dashboard` subscribers.
//!
//! - GET /api/v1/dashboard - Dashboard state
//! - POST /api/v1/dashboard/requests/:id/accept - Move a request into the queue
//! - POST /api/v1/dashboard/requests/:id/reject - Drop a request
//! - POST /api/v1/dashboard/queue/:id/start - Seat a waiting customer
//! - POST /api/v1/dashboard/chair/complete - Finish the current service
//! - POST /api/v1/dashboard/online - Toggle accepting / offline

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::OnlineResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::salon::{DashboardSnapshot, QueueCustomer, SalonId};

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(state.session.read().await.dashboard().snapshot())
}

/// POST /api/v1/dashboard/requests/:id/accept
pub async fn accept_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SalonId>,
) -> ApiResult<(StatusCode, Json<QueueCustomer>)> {
    let customer = state.session.write().await.dashboard_mut().accept(id)?;
    state.publish_dashboard().await;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// POST /api/v1/dashboard/requests/:id/reject
pub async fn reject_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SalonId>,
) -> ApiResult<StatusCode> {
    state.session.write().await.dashboard_mut().reject(id)?;
    state.publish_dashboard().await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/dashboard/queue/:id/start
///
/// 409 CHAIR_OCCUPIED while someone is in the chair.
pub async fn start_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SalonId>,
) -> ApiResult<Json<QueueCustomer>> {
    let customer = state
        .session
        .write()
        .await
        .dashboard_mut()
        .start_service(id, Utc::now())?
        .clone();
    state.publish_dashboard().await;
    Ok(Json(customer))
}

/// POST /api/v1/dashboard/chair/complete
///
/// 204 when the chair was already empty.
pub async fn complete_service(State(state): State<Arc<AppState>>) -> Response {
    let completed = state.session.write().await.dashboard_mut().complete_service();
    match completed {
        Some(completed) => {
            state.publish_dashboard().await;
            Json(completed).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// POST /api/v1/dashboard/online
pub async fn toggle_online(State(state): State<Arc<AppState>>) -> Json<OnlineResponse> {
    let online = state.session.write().await.dashboard_mut().toggle_online();
    state.publish_dashboard().await;
    Json(OnlineResponse { online })
}

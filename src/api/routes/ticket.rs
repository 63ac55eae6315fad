//! Ticket Routes
//!
//! The caller's own place in a salon's line.
//!
//! - GET /api/v1/ticket - Active ticket with minutes left
//! - POST /api/v1/ticket - Join a salon's queue
//! - DELETE /api/v1/ticket - Cancel the ticket

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{JoinQueueRequest, TicketResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::salon::countdown::ticket_minutes_left_at;
use crate::session::{Session, SessionError};
use crate::websocket::WsEvent;

fn ticket_response(state: &AppState, session: &Session) -> Option<TicketResponse> {
    session.active_ticket().map(|ticket| TicketResponse {
        minutes_left: ticket_minutes_left_at(ticket, Utc::now(), state.timer_settings.ticket_tick),
        ticket: ticket.clone(),
        visible: session.ticket_visible(),
    })
}

/// GET /api/v1/ticket
pub async fn get_ticket(State(state): State<Arc<AppState>>) -> ApiResult<Json<TicketResponse>> {
    let session = state.session.read().await;
    ticket_response(&state, &session)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No active ticket".to_string()))
}

/// POST /api/v1/ticket
///
/// 409 ALREADY_IN_QUEUE while a ticket is held.
pub async fn join_queue(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JoinQueueRequest>,
) -> ApiResult<(StatusCode, Json<TicketResponse>)> {
    let result = {
        let mut session = state.session.write().await;
        let joined = session.join_queue(req.salon_id, Utc::now()).map(|_| ());
        joined.map(|()| ticket_response(&state, &session))
    };

    // Joining, or trying to join twice, raises a toast
    if !matches!(result, Err(SessionError::SalonNotFound(_))) {
        state.publish_toast().await;
    }

    let response = result?
        .ok_or_else(|| ApiError::Internal("Ticket missing after join".to_string()))?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/v1/ticket
pub async fn cancel_ticket(State(state): State<Arc<AppState>>) -> StatusCode {
    let cancelled = state.session.write().await.cancel_ticket();
    if cancelled.is_some() {
        state.ws_hub.publish(WsEvent::ticket_cleared()).await;
    }
    StatusCode::NO_CONTENT
}

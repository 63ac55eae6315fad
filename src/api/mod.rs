//! TrimGo REST API
//!
//! HTTP API over one visitor session, built with Axum.
//!
//! # Endpoints
//!
//! ## Navigation
//! - `GET /api/v1/view` - Current view
//! - `PUT /api/v1/view` - Navigate
//! - `POST /api/v1/logout` - Log out to the home screen
//!
//! ## Discovery and sign-up
//! - `GET /api/v1/salons` - Discovery list (`search`, `category`, `sort`)
//! - `POST /api/v1/salons` - Register a salon
//! - `GET /api/v1/salons/:id` - Get a salon
//! - `GET /api/v1/users` - List users
//! - `POST /api/v1/users` - Register a user
//!
//! ## Ticket
//! - `GET /api/v1/ticket` - Active ticket with live countdown
//! - `POST /api/v1/ticket` - Join a queue
//! - `DELETE /api/v1/ticket` - Cancel
//!
//! ## Toast
//! - `GET /api/v1/toast` - Current toast
//! - `DELETE /api/v1/toast` - Dismiss
//!
//! ## Salon dashboard
//! - `GET /api/v1/dashboard` - Requests, queue, chair and stats
//! - `POST /api/v1/dashboard/requests/:id/accept`
//! - `POST /api/v1/dashboard/requests/:id/reject`
//! - `POST /api/v1/dashboard/queue/:id/start`
//! - `POST /api/v1/dashboard/chair/complete`
//! - `POST /api/v1/dashboard/online`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Live countdown, clock, dashboard and notices
//!
//! # Example
//!
//! ```rust,ignore
//! use trimgo::api::{serve, AppState};
//! use trimgo::config::Config;
//! use trimgo::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let session = Session::new(config.session_settings());
//!
//!     let state = AppState::new(session, config.api.clone(), config.timer_settings());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use crate::config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let body_limit = DefaultBodyLimit::max(state.config.max_body_size);

    let api_routes = Router::new()
        // Navigation
        .route(
            "/view",
            get(routes::view::get_view).put(routes::view::set_view),
        )
        .route("/logout", post(routes::view::logout))
        // Discovery and sign-up
        .route(
            "/salons",
            get(routes::salons::list_salons).post(routes::salons::register_salon),
        )
        .route("/salons/:id", get(routes::salons::get_salon))
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::register_user),
        )
        // Ticket
        .route(
            "/ticket",
            get(routes::ticket::get_ticket)
                .post(routes::ticket::join_queue)
                .delete(routes::ticket::cancel_ticket),
        )
        // Toast
        .route(
            "/toast",
            get(routes::toast::get_toast).delete(routes::toast::dismiss_toast),
        )
        // Salon dashboard
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route(
            "/dashboard/requests/:id/accept",
            post(routes::dashboard::accept_request),
        )
        .route(
            "/dashboard/requests/:id/reject",
            post(routes::dashboard::reject_request),
        )
        .route(
            "/dashboard/queue/:id/start",
            post(routes::dashboard::start_service),
        )
        .route(
            "/dashboard/chair/complete",
            post(routes::dashboard::complete_service),
        )
        .route("/dashboard/online", post(routes::dashboard::toggle_online))
        .layer(body_limit)
        // WebSocket route
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    state.start_timers().await;
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("TrimGo API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("TrimGo API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionSettings};
    use crate::timers::TimerSettings;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(
            Session::new(SessionSettings::default()),
            ApiConfig::default(),
            TimerSettings::default(),
        );
        build_router(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        app.clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app();

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = send(&app, "GET", uri, None).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_list_salons_hides_unverified() {
        let app = create_test_app();

        let response = send(&app, "GET", "/api/v1/salons", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["total"], 3);
        assert_eq!(body["salons"][0]["name"], "Fade & Blade Men’s Salon");
        assert_eq!(body["salons"][0]["chairs_free"], 4);
    }

    #[tokio::test]
    async fn test_list_salons_query() {
        let app = create_test_app();

        let response = send(&app, "GET", "/api/v1/salons?sort=rating&category=men-only", None).await;
        let body = json_body(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["salons"][0]["rating"], 4.9);

        let response = send(&app, "GET", "/api/v1/salons?sort=price", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_join_queue_twice_conflicts() {
        let app = create_test_app();

        let response = send(&app, "POST", "/api/v1/ticket", Some(r#"{"salon_id": 1}"#)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["number"], 4);
        assert_eq!(body["minutes_left"], 15);

        let response = send(&app, "POST", "/api/v1/ticket", Some(r#"{"salon_id": 3}"#)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "ALREADY_IN_QUEUE");

        let response = send(&app, "GET", "/api/v1/ticket", None).await;
        let body = json_body(response).await;
        assert_eq!(body["salon_name"], "Urban Cut Pro");
    }

    #[tokio::test]
    async fn test_cancel_ticket() {
        let app = create_test_app();

        send(&app, "POST", "/api/v1/ticket", Some(r#"{"salon_id": 1}"#)).await;
        let response = send(&app, "DELETE", "/api/v1/ticket", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, "GET", "/api/v1/ticket", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_join_unknown_salon() {
        let app = create_test_app();
        let response = send(&app, "POST", "/api/v1/ticket", Some(r#"{"salon_id": 42}"#)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let app = create_test_app();
        let response = send(&app, "POST", "/api/v1/ticket", Some("not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_workflow() {
        let app = create_test_app();

        let response = send(&app, "POST", "/api/v1/dashboard/requests/101/accept", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["wait_time"], 45);

        let response = send(&app, "POST", "/api/v1/dashboard/queue/201/start", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "POST", "/api/v1/dashboard/queue/202/start", None).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "CHAIR_OCCUPIED");

        let response = send(&app, "POST", "/api/v1/dashboard/chair/complete", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["stats"]["revenue"], 4750);
        assert_eq!(body["stats"]["customers"], 13);

        let response = send(&app, "POST", "/api/v1/dashboard/chair/complete", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_dashboard_not_found() {
        let app = create_test_app();

        let response = send(&app, "POST", "/api/v1/dashboard/requests/999/reject", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, "POST", "/api/v1/dashboard/queue/999/start", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_online() {
        let app = create_test_app();

        let response = send(&app, "POST", "/api/v1/dashboard/online", None).await;
        assert_eq!(json_body(response).await["online"], false);

        let response = send(&app, "POST", "/api/v1/dashboard/online", None).await;
        assert_eq!(json_body(response).await["online"], true);
    }

    #[tokio::test]
    async fn test_set_view() {
        let app = create_test_app();

        let response = send(&app, "PUT", "/api/v1/view", Some(r#"{"view": "salon-dashboard"}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["view"], "salon-dashboard");

        let response = send(&app, "PUT", "/api/v1/view", Some(r#"{"view": "settings"}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, "GET", "/api/v1/view", None).await;
        assert_eq!(json_body(response).await["view"], "salon-dashboard");
    }

    #[tokio::test]
    async fn test_register_user_sets_toast_and_view() {
        let app = create_test_app();

        let response = send(&app, "POST", "/api/v1/users", Some(r#"{"name": "Sanjay Choudhary"}"#)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["email"], "sanjaychoudhary@gmail.com");

        let response = send(&app, "GET", "/api/v1/toast", None).await;
        assert_eq!(json_body(response).await["message"], "Account created!");

        let response = send(&app, "GET", "/api/v1/view", None).await;
        assert_eq!(json_body(response).await["view"], "user-dashboard");

        let response = send(&app, "DELETE", "/api/v1/toast", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, "GET", "/api/v1/toast", None).await;
        assert!(json_body(response).await.is_null());
    }

    #[tokio::test]
    async fn test_register_salon() {
        let app = create_test_app();

        let response = send(
            &app,
            "POST",
            "/api/v1/salons",
            Some(r#"{"name": "Style Hub", "area": "Paota", "type": "Women Only"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["id"], 5);
        assert_eq!(body["verified"], false);

        let response = send(&app, "GET", "/api/v1/salons/5", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["verified"], false);

        let response = send(&app, "GET", "/api/v1/salons?search=Style%20Hub", None).await;
        assert_eq!(json_body(response).await["total"], 0);
    }

    #[tokio::test]
    async fn test_logout() {
        let app = create_test_app();

        send(&app, "PUT", "/api/v1/view", Some(r#"{"view": "user-profile"}"#)).await;
        let response = send(&app, "POST", "/api/v1/logout", None).await;
        assert_eq!(json_body(response).await["view"], "home");

        let response = send(&app, "GET", "/api/v1/toast", None).await;
        assert_eq!(json_body(response).await["message"], "Logged out successfully");
    }
}

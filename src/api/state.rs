//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};

use crate::config::ApiConfig;
use crate::session::Session;
use crate::timers::{TimerSettings, ViewTimers};
use crate::websocket::{ConnectionHub, HubConfig, WsEvent};

/// Shared application state for all handlers
pub struct AppState {
    /// The visitor's session; every operation takes the write lock once
    pub session: Arc<RwLock<Session>>,
    /// Display timers of the current view
    pub timers: Mutex<ViewTimers>,
    pub timer_settings: TimerSettings,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// WebSocket connection hub for real-time streaming
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(session: Session, config: ApiConfig, timer_settings: TimerSettings) -> Self {
        Self::with_ws_config(session, config, timer_settings, HubConfig::default())
    }

    /// Create AppState with custom WebSocket hub configuration
    pub fn with_ws_config(
        session: Session,
        config: ApiConfig,
        timer_settings: TimerSettings,
        hub_config: HubConfig,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            timers: Mutex::new(ViewTimers::new()),
            timer_settings,
            config: Arc::new(config),
            start_time: Instant::now(),
            ws_hub: Arc::new(ConnectionHub::new(hub_config)),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }

    /// Start the timers for whatever view the session is on
    pub async fn start_timers(&self) {
        self.sync_timers().await;
    }

    /// Replace the view timers after a navigation and announce it
    ///
    /// The view is read while the timer lock is held, so overlapping
    /// navigations always settle on the session's current view.
    pub async fn sync_timers(&self) {
        let (view, ticket_visible) = {
            let mut timers = self.timers.lock().await;
            let (view, ticket_visible) = {
                let session = self.session.read().await;
                (session.view(), session.ticket_visible())
            };
            timers.enter(view, &self.session, &self.ws_hub, &self.timer_settings);
            (view, ticket_visible)
        };

        self.ws_hub
            .publish(WsEvent::view_changed(view, ticket_visible))
            .await;
    }

    /// Push the current dashboard state to subscribers
    pub async fn publish_dashboard(&self) {
        let snapshot = self.session.read().await.dashboard().snapshot();
        self.ws_hub.publish(WsEvent::dashboard(snapshot)).await;
    }

    /// Push the current toast, if one is up, to subscribers
    pub async fn publish_toast(&self) {
        let event = self
            .session
            .read()
            .await
            .current_toast(Utc::now())
            .map(WsEvent::notice);
        if let Some(event) = event {
            self.ws_hub.publish(event).await;
        }
    }

    /// Stop all view timers
    pub async fn stop_timers(&self) {
        self.timers.lock().await.stop();
    }
}

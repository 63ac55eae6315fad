//! WebSocket Message Types
//!
//! Defines all message types exchanged between connected screens and the
//! TrimGo server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::salon::workflow::DashboardSnapshot;
use crate::session::{Toast, ToastKind, View};

/// Live ticket countdown frames
pub const TOPIC_TICKET: &str = "ticket";
/// Operator clock redraws
pub const TOPIC_CLOCK: &str = "clock";
/// Salon dashboard state after each change
pub const TOPIC_DASHBOARD: &str = "dashboard";
/// Toasts
pub const TOPIC_NOTICES: &str = "notices";
/// View changes and server events
pub const TOPIC_SYSTEM: &str = "system";
/// Every topic
pub const TOPIC_ALL: &str = "*";

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics for real-time updates
    Subscribe {
        /// List of topics to subscribe to (e.g., "ticket", "dashboard", "*")
        topics: Vec<String>,
    },
    /// Unsubscribe from topics
    Unsubscribe {
        topics: Vec<String>,
    },
    /// Ask for the current dashboard state
    Snapshot,
    /// Ask for the current ticket frame
    Ticket,
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// One frame of the live ticket widget
    TicketCountdown {
        salon_name: String,
        number: u32,
        minutes_left: u32,
    },
    /// The caller no longer holds a ticket
    TicketCleared,
    /// Operator header date line
    Clock {
        label: String,
        timestamp: DateTime<Utc>,
    },
    /// Salon dashboard state
    Dashboard {
        snapshot: DashboardSnapshot,
    },
    /// A toast went up
    Notice {
        kind: ToastKind,
        message: String,
    },
    /// The session moved to another view
    ViewChanged {
        view: View,
        ticket_visible: bool,
    },
    /// Subscription confirmed
    Subscribed {
        /// Topics successfully subscribed to
        topics: Vec<String>,
    },
    /// Unsubscription confirmed
    Unsubscribed {
        topics: Vec<String>,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
}

/// Internal event for broadcasting through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to (e.g., "dashboard")
    pub topic: &'static str,
    /// The message to send to subscribers
    pub message: ServerMessage,
}

impl WsEvent {
    /// Create a ticket countdown frame
    pub fn ticket(salon_name: &str, number: u32, minutes_left: u32) -> Self {
        Self {
            topic: TOPIC_TICKET,
            message: ServerMessage::TicketCountdown {
                salon_name: salon_name.to_string(),
                number,
                minutes_left,
            },
        }
    }

    /// Create a ticket-cleared event
    pub fn ticket_cleared() -> Self {
        Self {
            topic: TOPIC_TICKET,
            message: ServerMessage::TicketCleared,
        }
    }

    /// Create a clock redraw
    pub fn clock(label: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            topic: TOPIC_CLOCK,
            message: ServerMessage::Clock { label, timestamp },
        }
    }

    /// Create a dashboard state event
    pub fn dashboard(snapshot: DashboardSnapshot) -> Self {
        Self {
            topic: TOPIC_DASHBOARD,
            message: ServerMessage::Dashboard { snapshot },
        }
    }

    /// Create a notice from a toast
    pub fn notice(toast: &Toast) -> Self {
        Self {
            topic: TOPIC_NOTICES,
            message: ServerMessage::Notice {
                kind: toast.kind,
                message: toast.message.clone(),
            },
        }
    }

    /// Create a view change event
    pub fn view_changed(view: View, ticket_visible: bool) -> Self {
        Self {
            topic: TOPIC_SYSTEM,
            message: ServerMessage::ViewChanged {
                view,
                ticket_visible,
            },
        }
    }
}

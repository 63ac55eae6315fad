//! # TrimGo
//!
//! Live salon queues: customers find a salon with a short line and take a
//! ticket; salon owners run their booking requests, waiting queue and chair.
//!
//! ## Features
//!
//! - **Queue workflow**: Accept, reject, start and complete with a single chair
//! - **Discovery**: Search, category filter and sort over verified salons
//! - **Live screens**: Ticket countdown and operator clock pushed over WebSocket
//! - **REST API**: One visitor session served with Axum
//!
//! ## Modules
//!
//! - [`salon`]: Domain types, seed data, queue workflow, discovery, timers
//! - [`session`]: Root state owner for one visitor
//! - [`timers`]: View-scoped tokio tasks for the display timers
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Live updates to connected screens
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use trimgo::session::{Session, SessionSettings};
//!
//! let mut session = Session::new(SessionSettings::default());
//!
//! // Take a place in line
//! let ticket = session.join_queue(1, Utc::now()).unwrap();
//! assert_eq!(ticket.number, 4);
//!
//! // Run the salon dashboard
//! let dashboard = session.dashboard_mut();
//! dashboard.accept(101).unwrap();
//! dashboard.start_service(201, Utc::now()).unwrap();
//! let done = dashboard.complete_service().unwrap();
//! assert_eq!(done.stats.revenue, 4750);
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod salon;
pub mod session;
pub mod timers;
pub mod websocket;

pub use api::{build_router, serve, ApiError, AppState};
pub use config::{Config, ConfigError};
pub use salon::{QueueError, SalonQueue};
pub use session::{Session, SessionError, SessionSettings, View};
pub use timers::{TimerSettings, ViewTimers};

//! TrimGo Salon Domain
//!
//! This module provides the salon-side queue engine and the user-side
//! discovery logic:
//!
//! - **types**: Core data structures (Salon, SalonRequest, QueueCustomer, Stats, TicketData)
//! - **seed**: Compiled-in seed data loaded at session start
//! - **workflow**: The request → queue → chair state machine
//! - **discovery**: Verified-only filter, search, category filter and sorting
//! - **countdown**: Display timers as pure functions of elapsed time
//! - **error**: Error types
//!
//! # Workflow
//!
//! ```text
//! PENDING REQUEST --accept--> WAITING IN QUEUE --start--> IN CHAIR --complete--> (stats updated)
//! PENDING REQUEST --reject--> (discarded)
//! ```
//!
//! # Example
//!
//! ```rust
//! use trimgo::salon::{SalonQueue, QueueError};
//! use chrono::Utc;
//!
//! let mut dashboard = SalonQueue::seeded();
//!
//! // Accept the first pending request: it joins the tail of the queue
//! let customer = dashboard.accept(101).unwrap();
//! assert_eq!(customer.name, "Rahul Sharma");
//!
//! // Seat the head of the queue
//! dashboard.start_service(201, Utc::now()).unwrap();
//!
//! // A second start while the chair is busy is rejected
//! assert_eq!(dashboard.start_service(202, Utc::now()).unwrap_err(), QueueError::ChairOccupied);
//!
//! // Completing realises the revenue
//! let done = dashboard.complete_service().unwrap();
//! assert_eq!(done.stats.revenue, 4500 + 250);
//! ```

pub mod countdown;
pub mod discovery;
pub mod error;
pub mod seed;
pub mod types;
pub mod workflow;

// Re-export commonly used types
pub use countdown::{clock_label, ticket_minutes_left, ticket_minutes_left_at, toast_expired};
pub use discovery::{discover, parse_numeric_prefix, CategoryFilter, DiscoveryQuery, SortBy};
pub use error::{QueueError, QueueResult};
pub use types::{
    CustomerStatus, QueueCustomer, RequestStatus, Salon, SalonId, SalonRequest, SalonType, Stats,
    TicketData, UserData, UserStatus,
};
pub use workflow::{CompletedService, DashboardSnapshot, QueueEntry, SalonQueue};

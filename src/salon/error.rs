//! Queue workflow error types
//!
//! Defines the errors the salon dashboard can return to its caller.

use thiserror::Error;

use super::types::SalonId;

/// Errors that can occur in the queue workflow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// A service was started while another customer is still in the chair
    #[error("Chair is occupied! Please complete the current service first.")]
    ChairOccupied,

    /// No pending request with this id
    #[error("Request not found: {0}")]
    RequestNotFound(SalonId),

    /// No waiting customer with this id
    #[error("Customer not found in queue: {0}")]
    CustomerNotFound(SalonId),
}

/// Result type alias for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

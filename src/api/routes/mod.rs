//! API Routes
//!
//! Route handlers organized by screen.

pub mod dashboard;
pub mod health;
pub mod salons;
pub mod ticket;
pub mod toast;
pub mod users;
pub mod view;

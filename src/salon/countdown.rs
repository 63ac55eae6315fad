//! Display timers
//!
//! Countdown, clock and toast expiry computed from elapsed time instead of
//! counters decremented by a recurring callback. Each value is a function of
//! its start instant and "now", so redraw ticks cannot drift.

use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;

use crate::salon::types::TicketData;

/// Minutes shown on a ticket after `elapsed`, dropping one per `tick`
///
/// Never goes below zero. A zero tick freezes the countdown at `eta`.
pub fn ticket_minutes_left(eta: u32, elapsed: Duration, tick: Duration) -> u32 {
    if tick.is_zero() {
        return eta;
    }
    let ticks = elapsed.as_nanos() / tick.as_nanos();
    let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
    eta.saturating_sub(ticks)
}

/// Minutes shown on a ticket at `now`
pub fn ticket_minutes_left_at(ticket: &TicketData, now: DateTime<Utc>, tick: Duration) -> u32 {
    let elapsed = (now - ticket.issued_at).to_std().unwrap_or(Duration::ZERO);
    ticket_minutes_left(ticket.eta, elapsed, tick)
}

/// Operator header date line, e.g. "Monday, October 19, 2026"
pub fn clock_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %B %-d, %Y").to_string()
}

/// Whether a toast shown at `shown_at` has auto-dismissed by `now`
pub fn toast_expired(shown_at: DateTime<Utc>, now: DateTime<Utc>, duration: Duration) -> bool {
    (now - shown_at)
        .to_std()
        .map(|elapsed| elapsed >= duration)
        .unwrap_or(false)
}

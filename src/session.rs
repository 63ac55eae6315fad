//! Session State
//!
//! The root state owner for one visitor: the salon list, registered users,
//! the caller's queue ticket, the toast slot, the current view and the salon
//! dashboard. Every mutation goes through a method here; callers receive
//! typed results and decide how to present them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::salon::countdown::toast_expired;
use crate::salon::discovery::{discover, DiscoveryQuery};
use crate::salon::error::QueueError;
use crate::salon::seed;
use crate::salon::types::{Salon, SalonId, SalonType, TicketData, UserData, UserStatus};
use crate::salon::workflow::{SalonQueue, DEFAULT_SERVICE_MINUTES};

/// Screens of the application
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    UserRegister,
    SalonRegister,
    UserDashboard,
    UserProfile,
    SalonDashboard,
    AdminLogin,
    AdminDashboard,
}

impl View {
    /// Get all views for iteration
    pub fn all() -> &'static [View] {
        &[
            View::Home,
            View::UserRegister,
            View::SalonRegister,
            View::UserDashboard,
            View::UserProfile,
            View::SalonDashboard,
            View::AdminLogin,
            View::AdminDashboard,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::UserRegister => "user-register",
            View::SalonRegister => "salon-register",
            View::UserDashboard => "user-dashboard",
            View::UserProfile => "user-profile",
            View::SalonDashboard => "salon-dashboard",
            View::AdminLogin => "admin-login",
            View::AdminDashboard => "admin-dashboard",
        }
    }

    /// Whether the live ticket widget is drawn over this view
    pub fn shows_ticket(&self) -> bool {
        !matches!(
            self,
            View::SalonDashboard | View::AdminLogin | View::AdminDashboard
        )
    }

    /// Whether this view draws the operator clock
    pub fn shows_clock(&self) -> bool {
        matches!(self, View::SalonDashboard)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| SessionError::UnknownView(s.to_string()))
    }
}

/// Severity of a toast
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A transient, auto-dismissing notice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: DateTime<Utc>,
}

/// Salon sign-up form contents
///
/// Accepted as-is; the form has no validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewSalon {
    pub name: String,
    pub area: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub tag: String,
    #[serde(rename = "type", default)]
    pub salon_type: Option<SalonType>,
}

/// Tunables for a session
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Minutes of service assumed per person ahead in the dashboard queue
    pub service_minutes: u32,
    /// How long a toast stays up
    pub toast_duration: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            service_minutes: DEFAULT_SERVICE_MINUTES,
            toast_duration: Duration::from_secs(3),
        }
    }
}

/// Errors that can occur in session operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The caller already holds a ticket
    #[error("You are already in a queue!")]
    AlreadyInQueue,

    /// No salon visible to customers with this id
    #[error("Salon not found: {0}")]
    SalonNotFound(SalonId),

    /// View tag not recognised
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// Salon dashboard error
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// State owned by one visitor
#[derive(Debug, Clone)]
pub struct Session {
    view: View,
    salons: Vec<Salon>,
    users: Vec<UserData>,
    /// At most one ticket per caller
    active_ticket: Option<TicketData>,
    toast: Option<Toast>,
    /// Salon created through sign-up in this session
    registered_salon: Option<SalonId>,
    dashboard: SalonQueue,
    settings: SessionSettings,
    next_salon_id: SalonId,
    next_user_id: SalonId,
}

impl Session {
    /// Create a session from the compiled-in seed data
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_data(seed::salons(), seed::users(), SalonQueue::seeded(), settings)
    }

    /// Create a session from explicit data
    pub fn with_data(
        salons: Vec<Salon>,
        users: Vec<UserData>,
        dashboard: SalonQueue,
        settings: SessionSettings,
    ) -> Self {
        let next_salon_id = salons.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let next_user_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;

        Self {
            view: View::Home,
            salons,
            users,
            active_ticket: None,
            toast: None,
            registered_salon: None,
            dashboard: dashboard.with_service_minutes(settings.service_minutes),
            settings,
            next_salon_id,
            next_user_id,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Switch view, returning the one left
    pub fn navigate(&mut self, view: View) -> View {
        let previous = std::mem::replace(&mut self.view, view);
        if previous != view {
            tracing::debug!(from = %previous, to = %view, "View changed");
        }
        previous
    }

    pub fn salons(&self) -> &[Salon] {
        &self.salons
    }

    pub fn salon(&self, id: SalonId) -> Option<&Salon> {
        self.salons.iter().find(|s| s.id == id)
    }

    pub fn users(&self) -> &[UserData] {
        &self.users
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Salon registered in this session, if any
    pub fn registered_salon(&self) -> Option<&Salon> {
        self.registered_salon.and_then(|id| self.salon(id))
    }

    pub fn dashboard(&self) -> &SalonQueue {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut SalonQueue {
        &mut self.dashboard
    }

    /// Salons visible to customers under a query
    pub fn discover(&self, query: &DiscoveryQuery) -> Vec<&Salon> {
        discover(&self.salons, query)
    }

    /// Create a customer account and move to the customer dashboard
    pub fn register_user(&mut self, name: &str, now: DateTime<Utc>) -> &UserData {
        let user = UserData {
            id: self.next_user_id,
            name: name.to_string(),
            email: UserData::derive_email(name),
            joined: now.date_naive(),
            status: UserStatus::Active,
        };
        self.next_user_id += 1;

        tracing::info!(user_id = user.id, email = %user.email, "User registered");

        self.users.push(user);
        self.show_toast("Account created!", ToastKind::Success, now);
        self.navigate(View::UserDashboard);

        let index = self.users.len() - 1;
        &self.users[index]
    }

    /// List a new salon and move to its dashboard
    ///
    /// New salons start unverified, so customers cannot see them yet.
    pub fn register_salon(&mut self, new: NewSalon, now: DateTime<Utc>) -> &Salon {
        let id = self.next_salon_id;
        self.next_salon_id += 1;

        let salon = Salon::new(
            id,
            new.name,
            new.area,
            new.salon_type.unwrap_or(SalonType::Unisex),
        )
        .city(new.city)
        .distance(new.distance)
        .price(new.price)
        .tag(new.tag);

        tracing::info!(salon_id = id, name = %salon.name, "Salon registered");

        self.salons.push(salon);
        self.registered_salon = Some(id);
        self.show_toast("Salon registered successfully!", ToastKind::Success, now);
        self.navigate(View::SalonDashboard);

        let index = self.salons.len() - 1;
        &self.salons[index]
    }

    /// Take the next place in a salon's line
    ///
    /// Only one ticket may be held at a time; a second join is rejected with
    /// an error toast and the existing ticket is kept.
    pub fn join_queue(&mut self, salon_id: SalonId, now: DateTime<Utc>) -> SessionResult<&TicketData> {
        if self.active_ticket.is_some() {
            self.show_toast(SessionError::AlreadyInQueue.to_string(), ToastKind::Error, now);
            return Err(SessionError::AlreadyInQueue);
        }

        let salon = self
            .salons
            .iter()
            .find(|s| s.id == salon_id && s.verified)
            .ok_or(SessionError::SalonNotFound(salon_id))?;

        let ticket = TicketData::issue(salon, now);
        let message = format!("Joined queue for {}", salon.name);

        tracing::info!(
            salon_id,
            number = ticket.number,
            eta = ticket.eta,
            "Joined queue"
        );

        self.show_toast(message, ToastKind::Success, now);
        Ok(&*self.active_ticket.insert(ticket))
    }

    pub fn active_ticket(&self) -> Option<&TicketData> {
        self.active_ticket.as_ref()
    }

    /// Whether the ticket widget is on screen
    pub fn ticket_visible(&self) -> bool {
        self.active_ticket.is_some() && self.view.shows_ticket()
    }

    /// Drop the caller's ticket
    pub fn cancel_ticket(&mut self) -> Option<TicketData> {
        let ticket = self.active_ticket.take();
        if let Some(t) = &ticket {
            tracing::info!(salon = %t.salon_name, number = t.number, "Ticket cancelled");
        }
        ticket
    }

    /// Leave the customer profile and return home
    pub fn logout(&mut self, now: DateTime<Utc>) {
        self.show_toast("Logged out successfully", ToastKind::Success, now);
        self.navigate(View::Home);
    }

    /// Put a toast up, replacing any current one
    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind, now: DateTime<Utc>) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            shown_at: now,
        });
    }

    /// The toast on screen at `now`, if it has not timed out
    pub fn current_toast(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.toast
            .as_ref()
            .filter(|t| !toast_expired(t.shown_at, now, self.settings.toast_duration))
    }

    /// Close the toast early
    pub fn dismiss_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

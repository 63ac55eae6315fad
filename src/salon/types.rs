//! Core data types for the TrimGo salon domain
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Salon`: A listed salon as seen by customers
//! - `SalonRequest`: An unreviewed booking ask awaiting accept/reject
//! - `QueueCustomer`: A person in the waiting queue or in the chair
//! - `Stats`: Aggregate dashboard counters
//! - `TicketData`: The caller's own queue position
//! - `UserData`: A registered customer account

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier shared by salons, requests, customers and users
pub type SalonId = u64;

/// Number of chairs assumed when showing "chairs free" on a listing
pub const CHAIRS_PER_SALON: u32 = 5;

/// Who a salon serves
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SalonType {
    #[serde(rename = "Unisex")]
    Unisex,
    #[serde(rename = "Men Only")]
    MenOnly,
    #[serde(rename = "Women Only")]
    WomenOnly,
}

impl SalonType {
    /// Get all salon types for iteration
    pub fn all() -> &'static [SalonType] {
        &[SalonType::Unisex, SalonType::MenOnly, SalonType::WomenOnly]
    }

    /// Display label, as shown on the category chips
    pub fn as_str(&self) -> &'static str {
        match self {
            SalonType::Unisex => "Unisex",
            SalonType::MenOnly => "Men Only",
            SalonType::WomenOnly => "Women Only",
        }
    }
}

impl std::fmt::Display for SalonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SalonType {
    type Err = String;

    /// Accepts the display label as well as `men-only` / `men_only` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect();

        match normalized.as_str() {
            "unisex" => Ok(SalonType::Unisex),
            "men only" | "men" => Ok(SalonType::MenOnly),
            "women only" | "women" => Ok(SalonType::WomenOnly),
            _ => Err(format!(
                "Invalid salon type: {}. Use unisex, men-only or women-only",
                s
            )),
        }
    }
}

/// A salon listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Salon {
    pub id: SalonId,
    pub name: String,
    /// Neighbourhood, searched together with the name
    pub area: String,
    pub city: String,
    /// Display distance such as "1.2 km"
    pub distance: String,
    /// People currently waiting, as advertised on the listing
    pub waiting: u32,
    /// Advertised wait in minutes
    pub eta: u32,
    pub rating: f64,
    pub reviews: u32,
    /// Short highlight ("Fastest nearby")
    #[serde(default)]
    pub tag: String,
    /// Price tier label ("₹₹")
    #[serde(default)]
    pub price: String,
    #[serde(rename = "type")]
    pub salon_type: SalonType,
    /// Only verified salons are visible to customers
    pub verified: bool,
    pub revenue: u64,
}

impl Salon {
    /// Create an unverified salon with empty counters
    pub fn new(
        id: SalonId,
        name: impl Into<String>,
        area: impl Into<String>,
        salon_type: SalonType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            area: area.into(),
            city: String::new(),
            distance: String::new(),
            waiting: 0,
            eta: 0,
            rating: 0.0,
            reviews: 0,
            tag: String::new(),
            price: String::new(),
            salon_type,
            verified: false,
            revenue: 0,
        }
    }

    /// Builder method: set city
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Builder method: set display distance
    pub fn distance(mut self, distance: impl Into<String>) -> Self {
        self.distance = distance.into();
        self
    }

    /// Builder method: set advertised waiting count and eta
    pub fn waiting(mut self, waiting: u32, eta: u32) -> Self {
        self.waiting = waiting;
        self.eta = eta;
        self
    }

    /// Builder method: set rating and review count
    pub fn rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    /// Builder method: set highlight tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Builder method: set price tier label
    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Builder method: set verification flag
    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// Builder method: set revenue
    pub fn revenue(mut self, revenue: u64) -> Self {
        self.revenue = revenue;
        self
    }

    /// Chairs shown as free on the listing card
    pub fn chairs_free(&self) -> u32 {
        CHAIRS_PER_SALON.saturating_sub(self.waiting)
    }
}

/// Review state of a booking request
///
/// Accepted and rejected requests are removed rather than retained, so only
/// `Pending` is ever observed in a live dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

/// An incoming booking ask
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalonRequest {
    pub id: SalonId,
    pub name: String,
    pub service: String,
    /// Display label such as "2 min ago"
    pub time: String,
    pub status: RequestStatus,
    pub price: u64,
}

impl SalonRequest {
    /// Create a pending request
    pub fn new(
        id: SalonId,
        name: impl Into<String>,
        service: impl Into<String>,
        time: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            service: service.into(),
            time: time.into(),
            status: RequestStatus::Pending,
            price,
        }
    }
}

/// Where a customer is in the service flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerStatus {
    Waiting,
    InService,
}

/// A person waiting for, or receiving, service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueCustomer {
    pub id: SalonId,
    pub name: String,
    pub service: String,
    pub status: CustomerStatus,
    /// Estimated wait in minutes, fixed when the customer joined the queue
    pub wait_time: u32,
    pub price: u64,
    /// Set when the customer is seated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
}

impl QueueCustomer {
    /// Create a waiting customer
    pub fn new(
        id: SalonId,
        name: impl Into<String>,
        service: impl Into<String>,
        wait_time: u32,
        price: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            service: service.into(),
            status: CustomerStatus::Waiting,
            wait_time,
            price,
            start_time: None,
        }
    }

    /// Create a waiting customer from an accepted request
    pub fn from_request(request: &SalonRequest, id: SalonId, wait_time: u32) -> Self {
        Self::new(
            id,
            request.name.clone(),
            request.service.clone(),
            wait_time,
            request.price,
        )
    }
}

/// Aggregate dashboard counters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Stats {
    /// Realised revenue
    pub revenue: u64,
    /// Completed customers
    pub customers: u32,
    /// Displayed average wait in minutes (static, never recomputed)
    pub wait_time: u32,
}

/// The caller's own position at a salon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketData {
    pub salon_name: String,
    /// Position in line
    pub number: u32,
    /// Estimate at join time, in minutes
    pub eta: u32,
    /// Reference point for the countdown
    pub issued_at: DateTime<Utc>,
}

impl TicketData {
    /// Issue a ticket for the next place in a salon's advertised line
    pub fn issue(salon: &Salon, issued_at: DateTime<Utc>) -> Self {
        Self {
            salon_name: salon.name.clone(),
            number: salon.waiting.saturating_add(1),
            eta: salon.eta,
            issued_at,
        }
    }
}

/// Account state of a registered user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    Active,
}

/// A registered customer account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserData {
    pub id: SalonId,
    pub name: String,
    pub email: String,
    pub joined: NaiveDate,
    pub status: UserStatus,
}

impl UserData {
    /// Derive the placeholder email used by the sign-up form:
    /// lowercase name with the first space removed, at gmail.com
    pub fn derive_email(name: &str) -> String {
        format!("{}@gmail.com", name.to_lowercase().replacen(' ', "", 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salon_type_parse() {
        assert_eq!("Unisex".parse::<SalonType>(), Ok(SalonType::Unisex));
        assert_eq!("men-only".parse::<SalonType>(), Ok(SalonType::MenOnly));
        assert_eq!("Women Only".parse::<SalonType>(), Ok(SalonType::WomenOnly));
        assert!("kids".parse::<SalonType>().is_err());
    }

    #[test]
    fn test_salon_type_serde_uses_labels() {
        let json = serde_json::to_string(&SalonType::MenOnly).unwrap();
        assert_eq!(json, "\"Men Only\"");
    }

    #[test]
    fn test_chairs_free_never_negative() {
        let busy = Salon::new(1, "Busy", "Ratanada", SalonType::Unisex).waiting(9, 45);
        assert_eq!(busy.chairs_free(), 0);

        let quiet = Salon::new(2, "Quiet", "Sardarpura", SalonType::Unisex).waiting(1, 5);
        assert_eq!(quiet.chairs_free(), 4);
    }

    #[test]
    fn test_customer_status_serializes_kebab_case() {
        let json = serde_json::to_string(&CustomerStatus::InService).unwrap();
        assert_eq!(json, "\"in-service\"");
    }

    #[test]
    fn test_ticket_issue_takes_next_place() {
        let salon = Salon::new(1, "Urban Cut Pro", "Shastri Nagar", SalonType::Unisex)
            .waiting(3, 15);
        let ticket = TicketData::issue(&salon, Utc::now());
        assert_eq!(ticket.number, 4);
        assert_eq!(ticket.eta, 15);
        assert_eq!(ticket.salon_name, "Urban Cut Pro");
    }

    #[test]
    fn test_derive_email_removes_first_space_only() {
        assert_eq!(UserData::derive_email("Sanjay Choudhary"), "sanjaychoudhary@gmail.com");
        assert_eq!(UserData::derive_email("A B C"), "ab c@gmail.com");
        assert_eq!(UserData::derive_email(""), "@gmail.com");
    }
}

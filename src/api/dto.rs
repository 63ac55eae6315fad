//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::salon::{Salon, SalonId, SalonType, TicketData, UserData};
use crate::session::{NewSalon, View};

// ============================================
// View DTOs
// ============================================

/// Response for GET/PUT /api/v1/view
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    pub view: View,
    /// Whether the live ticket widget is drawn
    pub ticket_visible: bool,
}

/// Request body for PUT /api/v1/view
#[derive(Debug, Deserialize)]
pub struct SetViewRequest {
    /// Kebab-case view tag (e.g., "salon-dashboard")
    pub view: String,
}

// ============================================
// Salon DTOs
// ============================================

/// Query parameters for GET /api/v1/salons
#[derive(Debug, Default, Deserialize)]
pub struct SalonListQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// "All", "Unisex", "Men Only" or "Women Only"
    #[serde(default)]
    pub category: Option<String>,
    /// "waiting", "rating" or "distance"
    #[serde(default)]
    pub sort: Option<String>,
}

/// A salon as listed to customers
#[derive(Debug, Serialize, Deserialize)]
pub struct SalonResponse {
    #[serde(flatten)]
    pub salon: Salon,
    pub chairs_free: u32,
}

impl From<&Salon> for SalonResponse {
    fn from(salon: &Salon) -> Self {
        Self {
            chairs_free: salon.chairs_free(),
            salon: salon.clone(),
        }
    }
}

/// Response for GET /api/v1/salons
#[derive(Debug, Serialize, Deserialize)]
pub struct SalonListResponse {
    pub total: usize,
    pub salons: Vec<SalonResponse>,
}

/// Request body for POST /api/v1/salons
#[derive(Debug, Deserialize)]
pub struct RegisterSalonRequest {
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
    /// Category label; defaults to Unisex
    #[serde(rename = "type", default)]
    pub salon_type: Option<String>,
}

impl RegisterSalonRequest {
    /// Convert into the session's sign-up form
    pub fn into_new_salon(self) -> Result<NewSalon, String> {
        let salon_type = self
            .salon_type
            .as_deref()
            .map(str::parse::<SalonType>)
            .transpose()?;
        Ok(NewSalon {
            name: self.name,
            area: self.area,
            city: self.city,
            distance: self.distance,
            price: self.price,
            tag: self.tag,
            salon_type,
        })
    }
}

// ============================================
// User DTOs
// ============================================

/// Request body for POST /api/v1/users
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
}

/// Response for GET /api/v1/users
#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub total: usize,
    pub users: Vec<UserData>,
}

// ============================================
// Ticket DTOs
// ============================================

/// Request body for POST /api/v1/ticket
#[derive(Debug, Deserialize)]
pub struct JoinQueueRequest {
    pub salon_id: SalonId,
}

/// The caller's ticket with its live countdown
#[derive(Debug, Serialize, Deserialize)]
pub struct TicketResponse {
    #[serde(flatten)]
    pub ticket: TicketData,
    pub minutes_left: u32,
    /// Whether the ticket widget is drawn on the current view
    pub visible: bool,
}

// ============================================
// Dashboard DTOs
// ============================================

/// Response for POST /api/v1/dashboard/online
#[derive(Debug, Serialize, Deserialize)]
pub struct OnlineResponse {
    pub online: bool,
}

// ============================================
// Health DTOs
// ============================================

/// Response for GET /health
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub view: View,
    pub salons: usize,
    pub ws_connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

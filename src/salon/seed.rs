//! Seed data compiled into the application
//!
//! Every session starts from these lists. Nothing is persisted.

use chrono::NaiveDate;

use super::types::{QueueCustomer, Salon, SalonRequest, SalonType, Stats, UserData, UserStatus};

/// Salons listed at startup
pub fn salons() -> Vec<Salon> {
    vec![
        Salon::new(1, "Urban Cut Pro", "Shastri Nagar", SalonType::Unisex)
            .city("Jodhpur")
            .distance("1.2 km")
            .waiting(3, 15)
            .rating(4.8, 321)
            .tag("Fastest nearby")
            .price("₹₹")
            .verified(true)
            .revenue(15400),
        Salon::new(2, "The Royal Cut Studio", "Ratanada", SalonType::MenOnly)
            .city("Jodhpur")
            .distance("2.0 km")
            .waiting(9, 45)
            .rating(4.5, 189)
            .tag("Most booked")
            .price("₹₹₹")
            .verified(true)
            .revenue(8900),
        Salon::new(3, "Fade & Blade Men’s Salon", "Sardarpura", SalonType::MenOnly)
            .city("Jodhpur")
            .distance("0.9 km")
            .waiting(1, 5)
            .rating(4.9, 412)
            .tag("Low waiting now")
            .price("₹₹")
            .verified(true)
            .revenue(21000),
        Salon::new(4, "Glow & Glam Unisex Salon", "Civil Lines", SalonType::WomenOnly)
            .city("Jodhpur")
            .distance("3.4 km")
            .waiting(6, 30)
            .rating(4.3, 102)
            .tag("Family friendly")
            .price("₹₹")
            .verified(false)
            .revenue(3200),
    ]
}

/// Registered users at startup
pub fn users() -> Vec<UserData> {
    vec![
        user(101, "Suresh Raina", "suresh@example.com", 2025, 10, 12),
        user(102, "Rohit Sharma", "rohit@example.com", 2025, 11, 5),
        user(103, "Virat Kohli", "virat@example.com", 2025, 11, 28),
    ]
}

fn user(id: u64, name: &str, email: &str, year: i32, month: u32, day: u32) -> UserData {
    UserData {
        id,
        name: name.to_string(),
        email: email.to_string(),
        joined: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
        status: UserStatus::Active,
    }
}

/// Pending booking requests on the salon dashboard
pub fn requests() -> Vec<SalonRequest> {
    vec![
        SalonRequest::new(101, "Rahul Sharma", "Haircut & Beard", "10 min ago", 350),
        SalonRequest::new(102, "Amit Verma", "Hair Spa", "2 min ago", 800),
        SalonRequest::new(103, "Vikram Singh", "Shaving", "Just now", 150),
    ]
}

/// Customers already waiting when the dashboard opens
pub fn queue() -> Vec<QueueCustomer> {
    vec![
        QueueCustomer::new(201, "Suresh Raina", "Haircut", 15, 250),
        QueueCustomer::new(202, "Mahendra S.", "Beard Trim", 30, 100),
    ]
}

/// Dashboard counters when the dashboard opens
pub fn stats() -> Stats {
    Stats {
        revenue: 4500,
        customers: 12,
        wait_time: 25,
    }
}

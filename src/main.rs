//! TrimGo demo
//!
//! Walks one session through the customer and salon-owner flows and logs
//! what each step produces.

use chrono::Utc;
use std::time::Duration;
use trimgo::config::Config;
use trimgo::logging::init_tracing;
use trimgo::salon::{
    clock_label, ticket_minutes_left, CategoryFilter, DiscoveryQuery, QueueError, SalonType,
    SortBy,
};
use trimgo::session::{NewSalon, Session, SessionError, View};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_tracing(&config.logging)?;

    tracing::info!("TrimGo v{}", env!("CARGO_PKG_VERSION"));

    let mut session = Session::new(config.session_settings());

    demo_discovery(&session);
    demo_ticket(&mut session, config.timer_settings().ticket_tick)?;
    demo_dashboard(&mut session)?;
    demo_sign_up(&mut session);

    tracing::info!(clock = %clock_label(&chrono::Local::now()), "Demo complete");
    Ok(())
}

fn demo_discovery(session: &Session) {
    for sort in [SortBy::Waiting, SortBy::Rating, SortBy::Distance] {
        let names: Vec<&str> = session
            .discover(&DiscoveryQuery::new().sort(sort))
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        tracing::info!(?sort, salons = ?names, "Discovery");
    }

    let men_only = session.discover(
        &DiscoveryQuery::new()
            .search("cut")
            .category(CategoryFilter::Only(SalonType::MenOnly)),
    );
    tracing::info!(matches = men_only.len(), "Search \"cut\" in Men Only");
}

fn demo_ticket(session: &mut Session, tick: Duration) -> Result<(), SessionError> {
    session.navigate(View::UserDashboard);

    let ticket = session.join_queue(3, Utc::now())?.clone();
    tracing::info!(
        salon = %ticket.salon_name,
        number = ticket.number,
        eta = ticket.eta,
        "Ticket issued"
    );

    for ticks in [0u32, 2, 5, 10] {
        let left = ticket_minutes_left(ticket.eta, tick * ticks, tick);
        tracing::info!(ticks, minutes_left = left, "Countdown");
    }

    match session.join_queue(1, Utc::now()) {
        Err(SessionError::AlreadyInQueue) => {
            tracing::info!("Second join refused while a ticket is active");
        }
        other => tracing::warn!(result = ?other.map(|t| t.number), "Unexpected second join"),
    }

    session.cancel_ticket();
    Ok(())
}

fn demo_dashboard(session: &mut Session) -> Result<(), QueueError> {
    session.navigate(View::SalonDashboard);
    let dashboard = session.dashboard_mut();

    dashboard.accept(101)?;
    dashboard.accept(102)?;
    dashboard.reject(103)?;

    let first = dashboard.queue()[0].id;
    let second = dashboard.queue()[1].id;
    dashboard.start_service(first, Utc::now())?;

    if let Err(e) = dashboard.start_service(second, Utc::now()) {
        tracing::info!(error = %e, "Second start refused");
    }

    if let Some(done) = dashboard.complete_service() {
        tracing::info!(
            customer = %done.customer.name,
            revenue = done.stats.revenue,
            customers = done.stats.customers,
            "Service completed"
        );
    }

    let snapshot = dashboard.snapshot();
    tracing::info!(
        waiting = snapshot.queue.len(),
        pending = snapshot.requests.len(),
        online = snapshot.online,
        "Dashboard"
    );
    Ok(())
}

fn demo_sign_up(session: &mut Session) {
    let now = Utc::now();

    let email = session.register_user("Sanjay Choudhary", now).email.clone();
    tracing::info!(email = %email, view = %session.view(), "User signed up");

    let salon = NewSalon {
        name: "Style Hub".to_string(),
        area: "Paota".to_string(),
        city: "Jodhpur".to_string(),
        salon_type: Some(SalonType::Unisex),
        ..Default::default()
    };
    let id = session.register_salon(salon, now).id;
    tracing::info!(salon_id = id, view = %session.view(), "Salon signed up, pending verification");
}

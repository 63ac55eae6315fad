//! View-scoped display timers
//!
//! Each view owns the recurring tasks that redraw it: the live ticket
//! countdown on customer-facing views and the date line on the salon
//! dashboard. Leaving a view drops its [`TimerHandle`]s, which aborts the
//! tasks, so nothing keeps ticking for a screen that is gone.
//!
//! Ticks only read session state and publish frames to the WebSocket hub.

use chrono::{Local, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::salon::countdown::{clock_label, ticket_minutes_left_at};
use crate::session::{Session, View};
use crate::websocket::{ConnectionHub, WsEvent};

/// Tick periods for the display timers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    /// One minute comes off the ticket countdown per tick
    pub ticket_tick: Duration,
    /// Operator clock redraw period
    pub clock_tick: Duration,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            ticket_tick: Duration::from_secs(2),
            clock_tick: Duration::from_secs(60),
        }
    }
}

/// A running timer task, aborted when dropped
#[derive(Debug)]
pub struct TimerHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!(timer = self.name, "Timer stopped");
    }
}

/// Timers belonging to the current view
#[derive(Debug, Default)]
pub struct ViewTimers {
    view: Option<View>,
    handles: Vec<TimerHandle>,
}

impl ViewTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in the timers for `view`
    ///
    /// Re-entering the current view keeps its timers running.
    pub fn enter(
        &mut self,
        view: View,
        session: &Arc<RwLock<Session>>,
        hub: &Arc<ConnectionHub>,
        settings: &TimerSettings,
    ) {
        if self.view == Some(view) {
            return;
        }

        self.handles.clear();
        self.view = Some(view);

        if view.shows_ticket() {
            if let Some(handle) =
                spawn_ticket_countdown(Arc::clone(session), Arc::clone(hub), settings.ticket_tick)
            {
                self.handles.push(handle);
            }
        }

        if view.shows_clock() {
            if let Some(handle) = spawn_clock(Arc::clone(hub), settings.clock_tick) {
                self.handles.push(handle);
            }
        }

        tracing::debug!(view = %view, timers = ?self.running(), "View timers started");
    }

    /// View the running timers belong to
    pub fn view(&self) -> Option<View> {
        self.view
    }

    /// Names of the running timers
    pub fn running(&self) -> Vec<&'static str> {
        self.handles.iter().map(TimerHandle::name).collect()
    }

    /// Abort every timer
    pub fn stop(&mut self) {
        self.handles.clear();
        self.view = None;
    }
}

/// Publish the caller's ticket countdown every `tick`
///
/// Frames are computed from the ticket's issue time, so a countdown picks up
/// where it should after the widget was hidden.
fn spawn_ticket_countdown(
    session: Arc<RwLock<Session>>,
    hub: Arc<ConnectionHub>,
    tick: Duration,
) -> Option<TimerHandle> {
    if tick.is_zero() {
        tracing::warn!("Ticket tick is zero, countdown disabled");
        return None;
    }

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        loop {
            interval.tick().await;

            let event = {
                let session = session.read().await;
                session.active_ticket().map(|ticket| {
                    let left = ticket_minutes_left_at(ticket, Utc::now(), tick);
                    WsEvent::ticket(&ticket.salon_name, ticket.number, left)
                })
            };

            if let Some(event) = event {
                hub.publish(event).await;
            }
        }
    });

    Some(TimerHandle {
        name: "ticket",
        task,
    })
}

/// Publish the operator date line every `tick`
fn spawn_clock(hub: Arc<ConnectionHub>, tick: Duration) -> Option<TimerHandle> {
    if tick.is_zero() {
        tracing::warn!("Clock tick is zero, clock disabled");
        return None;
    }

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        loop {
            interval.tick().await;
            let label = clock_label(&Local::now());
            hub.publish(WsEvent::clock(label, Utc::now())).await;
        }
    });

    Some(TimerHandle {
        name: "clock",
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::ServerMessage;
    use tokio::sync::mpsc;

    fn fast() -> TimerSettings {
        TimerSettings {
            ticket_tick: Duration::from_millis(10),
            clock_tick: Duration::from_millis(10),
        }
    }

    async fn subscriber(
        hub: &ConnectionHub,
        topic: &str,
    ) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();
        hub.subscribe(&id, vec![topic.to_string()]).await.unwrap();
        rx
    }

    #[tokio::test]
    async fn test_timers_follow_view() {
        let session = Arc::new(RwLock::new(Session::default()));
        let hub = Arc::new(ConnectionHub::default());
        let mut timers = ViewTimers::new();

        timers.enter(View::UserDashboard, &session, &hub, &fast());
        assert_eq!(timers.running(), vec!["ticket"]);

        timers.enter(View::SalonDashboard, &session, &hub, &fast());
        assert_eq!(timers.running(), vec!["clock"]);

        timers.enter(View::AdminLogin, &session, &hub, &fast());
        assert!(timers.running().is_empty());

        timers.stop();
        assert_eq!(timers.view(), None);
    }

    #[tokio::test]
    async fn test_ticket_countdown_publishes_frames() {
        let session = Arc::new(RwLock::new(Session::default()));
        session.write().await.join_queue(1, Utc::now()).unwrap();

        let hub = Arc::new(ConnectionHub::default());
        let mut rx = subscriber(&hub, "ticket").await;

        let mut timers = ViewTimers::new();
        timers.enter(View::UserDashboard, &session, &hub, &fast());

        let frame = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        match frame {
            ServerMessage::TicketCountdown {
                salon_name, number, ..
            } => {
                assert_eq!(salon_name, "Urban Cut Pro");
                assert_eq!(number, 4);
            }
            other => panic!("Expected TicketCountdown, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_leaving_view_stops_publishing() {
        let session = Arc::new(RwLock::new(Session::default()));
        let hub = Arc::new(ConnectionHub::default());
        let mut rx = subscriber(&hub, "clock").await;

        let mut timers = ViewTimers::new();
        timers.enter(View::SalonDashboard, &session, &hub, &fast());

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap();
        assert!(matches!(first, Some(ServerMessage::Clock { .. })));

        timers.enter(View::Home, &session, &hub, &fast());
        // Let an aborted task's last in-flight publish land, then drain
        tokio::time::sleep(Duration::from_millis(30)).await;
        while rx.try_recv().is_ok() {}

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_zero_tick_disables_timer() {
        let session = Arc::new(RwLock::new(Session::default()));
        let hub = Arc::new(ConnectionHub::default());
        let settings = TimerSettings {
            ticket_tick: Duration::ZERO,
            clock_tick: Duration::ZERO,
        };

        let mut timers = ViewTimers::new();
        timers.enter(View::SalonDashboard, &session, &hub, &settings);
        assert!(timers.running().is_empty());
        assert_eq!(timers.view(), Some(View::SalonDashboard));
    }
}

//! Salon Queue Workflow
//!
//! The salon owner's operational core: pending requests are accepted into a
//! FIFO waiting queue, the head is seated in the single chair, and completing
//! the service realises revenue.
//!
//! A customer lives in exactly one of {pending requests, waiting queue, chair}.
//! Every transition moves the record; nothing is copied into two collections.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::salon::error::{QueueError, QueueResult};
use crate::salon::seed;
use crate::salon::types::{CustomerStatus, QueueCustomer, SalonId, SalonRequest, Stats};

/// Minutes of service assumed per person ahead in the queue
pub const DEFAULT_SERVICE_MINUTES: u32 = 15;

/// The salon dashboard state machine
#[derive(Debug, Clone)]
pub struct SalonQueue {
    /// Booking requests awaiting review
    requests: Vec<SalonRequest>,
    /// Accepted customers, head first
    queue: Vec<QueueCustomer>,
    /// The single in-service slot
    chair: Option<QueueCustomer>,
    stats: Stats,
    /// Accepting / offline toggle (display only)
    online: bool,
    service_minutes: u32,
    /// Next id handed to an accepted customer
    next_id: SalonId,
}

/// Outcome of a completed service
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompletedService {
    /// The customer who left the chair
    pub customer: QueueCustomer,
    /// Counters after the revenue was realised
    pub stats: Stats,
}

/// A waiting customer with its displayed position
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueueEntry {
    /// 1-based position in line
    pub position: usize,
    #[serde(flatten)]
    pub customer: QueueCustomer,
}

/// Point-in-time view of the whole dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSnapshot {
    pub online: bool,
    pub requests: Vec<SalonRequest>,
    pub queue: Vec<QueueEntry>,
    pub chair: Option<QueueCustomer>,
    pub stats: Stats,
}

impl SalonQueue {
    /// Create a dashboard from explicit collections
    pub fn new(requests: Vec<SalonRequest>, queue: Vec<QueueCustomer>, stats: Stats) -> Self {
        let max_id = requests
            .iter()
            .map(|r| r.id)
            .chain(queue.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);

        Self {
            requests,
            queue,
            chair: None,
            stats,
            online: true,
            service_minutes: DEFAULT_SERVICE_MINUTES,
            next_id: max_id + 1,
        }
    }

    /// Create a dashboard from the compiled-in seed data
    pub fn seeded() -> Self {
        Self::new(seed::requests(), seed::queue(), seed::stats())
    }

    /// Builder method: set minutes of service assumed per person ahead
    pub fn with_service_minutes(mut self, minutes: u32) -> Self {
        self.service_minutes = minutes;
        self
    }

    /// Pending requests, in arrival order
    pub fn requests(&self) -> &[SalonRequest] {
        &self.requests
    }

    /// Waiting customers, head first
    pub fn queue(&self) -> &[QueueCustomer] {
        &self.queue
    }

    /// Customer currently in the chair
    pub fn chair(&self) -> Option<&QueueCustomer> {
        self.chair.as_ref()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn service_minutes(&self) -> u32 {
        self.service_minutes
    }

    /// 1-based position of a waiting customer
    pub fn position_of(&self, customer_id: SalonId) -> Option<usize> {
        self.queue
            .iter()
            .position(|c| c.id == customer_id)
            .map(|i| i + 1)
    }

    /// Estimated wait for whoever joins the tail next
    pub fn next_wait_time(&self) -> u32 {
        let ahead = u32::try_from(self.queue.len()).unwrap_or(u32::MAX);
        ahead
            .saturating_mul(self.service_minutes)
            .saturating_add(self.service_minutes)
    }

    /// Accept a pending request into the tail of the queue
    ///
    /// Revenue is not touched; it is realised on completion.
    pub fn accept(&mut self, request_id: SalonId) -> QueueResult<QueueCustomer> {
        let index = self
            .requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or(QueueError::RequestNotFound(request_id))?;

        let wait_time = self.next_wait_time();
        let request = self.requests.remove(index);
        let customer = QueueCustomer::from_request(&request, self.allocate_id(), wait_time);
        self.queue.push(customer.clone());

        tracing::info!(
            request_id,
            customer_id = customer.id,
            position = self.queue.len(),
            wait_time,
            "Request accepted"
        );

        Ok(customer)
    }

    /// Reject a pending request
    pub fn reject(&mut self, request_id: SalonId) -> QueueResult<SalonRequest> {
        let index = self
            .requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or(QueueError::RequestNotFound(request_id))?;

        let request = self.requests.remove(index);
        tracing::info!(request_id, "Request rejected");
        Ok(request)
    }

    /// Seat a waiting customer
    ///
    /// Fails with [`QueueError::ChairOccupied`] while someone is in the chair;
    /// the attempt is dropped and nothing changes.
    pub fn start_service(
        &mut self,
        customer_id: SalonId,
        now: DateTime<Utc>,
    ) -> QueueResult<&QueueCustomer> {
        if let Some(occupant) = &self.chair {
            tracing::warn!(
                customer_id,
                occupant_id = occupant.id,
                "Start rejected: chair occupied"
            );
            return Err(QueueError::ChairOccupied);
        }

        let index = self
            .queue
            .iter()
            .position(|c| c.id == customer_id)
            .ok_or(QueueError::CustomerNotFound(customer_id))?;

        let mut customer = self.queue.remove(index);
        customer.status = CustomerStatus::InService;
        customer.start_time = Some(now);

        tracing::info!(customer_id, service = %customer.service, "Service started");

        Ok(&*self.chair.insert(customer))
    }

    /// Finish the service in the chair
    ///
    /// Returns `None` when the chair is empty.
    pub fn complete_service(&mut self) -> Option<CompletedService> {
        let customer = self.chair.take()?;

        self.stats.revenue = self.stats.revenue.saturating_add(customer.price);
        self.stats.customers = self.stats.customers.saturating_add(1);

        tracing::info!(
            customer_id = customer.id,
            price = customer.price,
            revenue = self.stats.revenue,
            customers = self.stats.customers,
            "Service completed"
        );

        Some(CompletedService {
            customer,
            stats: self.stats,
        })
    }

    /// Flip the accepting / offline flag and return the new value
    pub fn toggle_online(&mut self) -> bool {
        self.online = !self.online;
        tracing::info!(online = self.online, "Availability toggled");
        self.online
    }

    /// Serializable view of the dashboard
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            online: self.online,
            requests: self.requests.clone(),
            queue: self
                .queue
                .iter()
                .enumerate()
                .map(|(i, c)| QueueEntry {
                    position: i + 1,
                    customer: c.clone(),
                })
                .collect(),
            chair: self.chair.clone(),
            stats: self.stats,
        }
    }

    fn allocate_id(&mut self) -> SalonId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for SalonQueue {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_queue() -> SalonQueue {
        SalonQueue::new(seed::requests(), Vec::new(), seed::stats())
    }

    /// Every id appears in at most one of requests / queue / chair
    fn assert_exclusive(q: &SalonQueue) {
        let mut seen = std::collections::HashSet::new();
        for id in q
            .requests()
            .iter()
            .map(|r| r.id)
            .chain(q.queue().iter().map(|c| c.id))
            .chain(q.chair().map(|c| c.id))
        {
            assert!(seen.insert(id), "id {} present twice", id);
        }
    }

    #[test]
    fn test_accept_two_in_order() {
        let mut q = empty_queue();

        q.accept(101).unwrap();
        q.accept(102).unwrap();

        let names: Vec<_> = q.queue().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rahul Sharma", "Amit Verma"]);

        let waits: Vec<_> = q.queue().iter().map(|c| c.wait_time).collect();
        assert_eq!(waits, vec![15, 30]);

        assert_eq!(q.requests().len(), 1);
        assert_eq!(q.requests()[0].id, 103);
        assert_exclusive(&q);
    }

    #[test]
    fn test_accept_does_not_touch_stats() {
        let mut q = empty_queue();
        let before = q.stats();
        q.accept(102).unwrap();
        assert_eq!(q.stats(), before);
    }

    #[test]
    fn test_accept_wait_counts_existing_queue() {
        let mut q = SalonQueue::seeded();
        let customer = q.accept(103).unwrap();
        // Two already waiting
        assert_eq!(customer.wait_time, 45);
        assert_eq!(q.position_of(customer.id), Some(3));
    }

    #[test]
    fn test_accept_uses_configured_service_minutes() {
        let mut q = empty_queue().with_service_minutes(20);
        assert_eq!(q.accept(101).unwrap().wait_time, 20);
        assert_eq!(q.accept(102).unwrap().wait_time, 40);
    }

    #[test]
    fn test_accept_unknown_request() {
        let mut q = empty_queue();
        assert_eq!(q.accept(999), Err(QueueError::RequestNotFound(999)));
        assert_eq!(q.requests().len(), 3);
        assert!(q.queue().is_empty());
    }

    #[test]
    fn test_accepted_ids_are_fresh() {
        let mut q = SalonQueue::seeded();
        let a = q.accept(101).unwrap();
        let b = q.accept(102).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id > 202 && b.id > 202);
        assert_exclusive(&q);
    }

    #[test]
    fn test_reject_removes_request_only() {
        let mut q = SalonQueue::seeded();
        let rejected = q.reject(102).unwrap();
        assert_eq!(rejected.name, "Amit Verma");
        assert_eq!(q.requests().len(), 2);
        assert_eq!(q.queue().len(), 2);
        assert_eq!(q.stats(), seed::stats());

        assert_eq!(q.reject(102), Err(QueueError::RequestNotFound(102)));
    }

    #[test]
    fn test_start_moves_customer_to_chair() {
        let mut q = SalonQueue::seeded();
        let now = Utc::now();

        let seated = q.start_service(201, now).unwrap();
        assert_eq!(seated.name, "Suresh Raina");
        assert_eq!(seated.status, CustomerStatus::InService);
        assert_eq!(seated.start_time, Some(now));

        assert_eq!(q.queue().len(), 1);
        assert_eq!(q.position_of(202), Some(1));
        assert_exclusive(&q);
    }

    #[test]
    fn test_start_rejected_while_chair_occupied() {
        let mut q = empty_queue();
        q.accept(101).unwrap();
        q.accept(102).unwrap();
        let first = q.queue()[0].id;
        let second = q.queue()[1].id;

        q.start_service(first, Utc::now()).unwrap();
        let queue_before = q.queue().to_vec();

        let result = q.start_service(second, Utc::now());
        assert_eq!(result.unwrap_err(), QueueError::ChairOccupied);

        assert_eq!(q.chair().map(|c| c.id), Some(first));
        assert_eq!(q.queue(), queue_before.as_slice());
        assert_exclusive(&q);
    }

    #[test]
    fn test_chair_guard_checked_before_lookup() {
        let mut q = SalonQueue::seeded();
        q.start_service(201, Utc::now()).unwrap();
        assert_eq!(
            q.start_service(999, Utc::now()).unwrap_err(),
            QueueError::ChairOccupied
        );
    }

    #[test]
    fn test_start_unknown_customer() {
        let mut q = SalonQueue::seeded();
        assert_eq!(
            q.start_service(999, Utc::now()).unwrap_err(),
            QueueError::CustomerNotFound(999)
        );
        assert!(q.chair().is_none());
    }

    #[test]
    fn test_complete_updates_stats() {
        let mut q = empty_queue();
        let customer = q.accept(101).unwrap();
        assert_eq!(customer.price, 350);

        q.start_service(customer.id, Utc::now()).unwrap();
        let done = q.complete_service().unwrap();

        assert_eq!(done.customer.id, customer.id);
        assert_eq!(done.stats.revenue, 4850);
        assert_eq!(done.stats.customers, 13);
        assert_eq!(done.stats.wait_time, 25);
        assert_eq!(q.stats(), done.stats);
        assert!(q.chair().is_none());
    }

    #[test]
    fn test_complete_empty_chair_is_noop() {
        let mut q = SalonQueue::seeded();
        let before = q.stats();
        assert!(q.complete_service().is_none());
        assert_eq!(q.stats(), before);
        assert_eq!(q.queue().len(), 2);
    }

    #[test]
    fn test_chair_free_after_complete() {
        let mut q = SalonQueue::seeded();
        q.start_service(201, Utc::now()).unwrap();
        q.complete_service().unwrap();
        assert!(q.start_service(202, Utc::now()).is_ok());
    }

    #[test]
    fn test_fifo_across_many_accepts() {
        let requests: Vec<_> = (1..=20)
            .map(|i| SalonRequest::new(i, format!("Customer {}", i), "Haircut", "Just now", 100))
            .collect();
        let mut q = SalonQueue::new(requests, Vec::new(), Stats::default());

        for id in [5, 1, 17, 3, 9] {
            q.accept(id).unwrap();
        }

        let names: Vec<_> = q.queue().iter().map(|c| c.name.clone()).collect();
        assert_eq!(
            names,
            vec!["Customer 5", "Customer 1", "Customer 17", "Customer 3", "Customer 9"]
        );
        let waits: Vec<_> = q.queue().iter().map(|c| c.wait_time).collect();
        assert_eq!(waits, vec![15, 30, 45, 60, 75]);
    }

    #[test]
    fn test_exclusive_through_mixed_sequence() {
        let mut q = SalonQueue::seeded();
        let now = Utc::now();

        let a = q.accept(101).unwrap();
        assert_exclusive(&q);
        q.reject(102).unwrap();
        assert_exclusive(&q);
        q.start_service(201, now).unwrap();
        assert_exclusive(&q);
        let _ = q.start_service(a.id, now);
        assert_exclusive(&q);
        q.complete_service().unwrap();
        assert_exclusive(&q);
        q.start_service(a.id, now).unwrap();
        assert_exclusive(&q);
        q.accept(103).unwrap();
        assert_exclusive(&q);
    }

    #[test]
    fn test_toggle_online() {
        let mut q = SalonQueue::seeded();
        assert!(q.is_online());
        assert!(!q.toggle_online());
        // Offline does not gate accepting
        assert!(q.accept(101).is_ok());
        assert!(q.toggle_online());
    }

    #[test]
    fn test_snapshot_positions() {
        let mut q = SalonQueue::seeded();
        q.start_service(201, Utc::now()).unwrap();
        let snap = q.snapshot();

        assert_eq!(snap.queue.len(), 1);
        assert_eq!(snap.queue[0].position, 1);
        assert_eq!(snap.queue[0].customer.id, 202);
        assert_eq!(snap.chair.as_ref().map(|c| c.id), Some(201));
        assert_eq!(snap.requests.len(), 3);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["queue"][0]["position"], 1);
        assert_eq!(json["queue"][0]["name"], "Mahendra S.");
        assert_eq!(json["chair"]["status"], "in-service");
    }
}

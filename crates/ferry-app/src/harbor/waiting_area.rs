//! Per-port waiting areas

use std::collections::VecDeque;

use ferry_types::{Port, SimEvent, Vehicle};
use tokio::sync::{Mutex, MutexGuard};

use crate::journal::Journal;

/// Exclusive access to a waiting queue, held by the ferry for a whole
/// loading pass
pub type QueueGuard<'a> = MutexGuard<'a, VecDeque<Vehicle>>;

/// FIFO of vehicles waiting for the ferry at one port.
///
/// Vehicles only join at the back; only the ferry removes them, from the
/// front, while holding [`WaitingArea::lock`].
#[derive(Debug)]
pub struct WaitingArea {
    port: Port,
    queue: Mutex<VecDeque<Vehicle>>,
}

impl WaitingArea {
    pub fn new(port: Port) -> Self {
        Self {
            port,
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Append `vehicle` and return the new queue length. The queued event
    /// is journaled before the lock is released, so journal order is queue
    /// order.
    pub async fn enqueue(&self, vehicle: Vehicle, journal: &Journal) -> usize {
        let mut queue = self.queue.lock().await;
        queue.push_back(vehicle);
        journal.record(SimEvent::VehicleQueued {
            vehicle: vehicle.id,
            port: self.port,
            queue_len: queue.len(),
        });
        queue.len()
    }

    pub async fn size(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// Exclusive access for the ferry's loading pass
    pub async fn lock(&self) -> QueueGuard<'_> {
        self.queue.lock().await
    }

}

#[cfg(test)]
impl WaitingArea {
    pub(crate) async fn peek_front(&self) -> Option<Vehicle> {
        self.queue.lock().await.front().copied()
    }

    /// Queue contents, front first
    pub(crate) async fn contents(&self) -> Vec<Vehicle> {
        self.queue.lock().await.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_types::VehicleClass;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_enqueue_keeps_arrival_order() {
        let area = WaitingArea::new(Port::West);
        let journal = Journal::new();
        for id in 0..4 {
            let len = area
                .enqueue(Vehicle::new(id, VehicleClass::Car, Port::West, 0), &journal)
                .await;
            assert_eq!(len, id as usize + 1);
        }

        let ids: Vec<_> = area.contents().await.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(area.peek_front().await.map(|v| v.id), Some(0));
        assert_eq!(journal.queued_at(Port::West), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_front_removal_under_lock() {
        let area = WaitingArea::new(Port::East);
        let journal = Journal::new();
        area.enqueue(Vehicle::new(5, VehicleClass::Truck, Port::East, 1), &journal)
            .await;
        area.enqueue(Vehicle::new(6, VehicleClass::Car, Port::East, 0), &journal)
            .await;

        {
            let mut queue = area.lock().await;
            assert_eq!(queue.pop_front().map(|v| v.id), Some(5));
        }
        assert_eq!(area.size().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_enqueue_matches_journal() {
        let area = Arc::new(WaitingArea::new(Port::West));
        let journal = Arc::new(Journal::new());

        let handles: Vec<_> = (0..32)
            .map(|id| {
                let area = Arc::clone(&area);
                let journal = Arc::clone(&journal);
                tokio::spawn(async move {
                    area.enqueue(Vehicle::new(id, VehicleClass::Minibus, Port::West, 0), &journal)
                        .await
                })
            })
            .collect();
        for h in handles {
            h.await.unwrap();
        }

        let queued: Vec<_> = area.contents().await.iter().map(|v| v.id).collect();
        assert_eq!(queued.len(), 32);
        assert_eq!(queued, journal.queued_at(Port::West));
    }
}

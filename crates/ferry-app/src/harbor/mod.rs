//! Shared harbor resources
//!
//! Each gate, each waiting area and the ferry has its own lock; nothing
//! global serializes them. The one operation touching two locks, the
//! loading pass, always takes the waiting area before the ferry.

mod toll_gate;
mod waiting_area;

pub use toll_gate::TollGate;
pub use waiting_area::{QueueGuard, WaitingArea};

use ferry_types::{GateId, Port, GATES_PER_PORT, PORT_COUNT};
use tokio::sync::Notify;

use crate::config::Timings;
use crate::ferry::Ferry;
use crate::journal::Journal;

/// Everything the ferry and vehicle tasks share, handed to each task in an
/// `Arc` at startup
#[derive(Debug)]
pub struct Harbor {
    gates: Vec<TollGate>,
    areas: [WaitingArea; PORT_COUNT],
    ferry: Ferry,
    journal: Journal,
    arrivals: Notify,
    timings: Timings,
}

impl Harbor {
    pub fn new(capacity: u32, start_port: Port, timings: Timings) -> Self {
        let gates = (0..PORT_COUNT * GATES_PER_PORT as usize)
            .map(|_| TollGate::new())
            .collect();
        Self {
            gates,
            areas: Port::ALL.map(WaitingArea::new),
            ferry: Ferry::new(capacity, start_port),
            journal: Journal::new(),
            arrivals: Notify::new(),
            timings,
        }
    }

    pub fn gate(&self, id: GateId) -> &TollGate {
        &self.gates[id.0 as usize]
    }

    pub fn area(&self, port: Port) -> &WaitingArea {
        &self.areas[port.index()]
    }

    pub fn ferry(&self) -> &Ferry {
        &self.ferry
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Wake the ferry if it is idling
    pub fn notify_arrival(&self) {
        self.arrivals.notify_one();
    }

    /// Wait for the next arrival, at most `timeout`
    pub async fn wait_for_arrival(&self, timeout: std::time::Duration) {
        tokio::select! {
            _ = self.arrivals.notified() => {}
            _ = tokio::time::sleep(timeout) => {}
        }
    }

    /// Queue lengths of both ports, taken under both area locks
    pub async fn waiting(&self) -> [usize; PORT_COUNT] {
        let west = self.area(Port::West).lock().await;
        let east = self.area(Port::East).lock().await;
        [west.len(), east.len()]
    }

    /// True once no vehicle is queued and the ferry deck is empty.
    ///
    /// Locks are taken areas first, then the ferry, matching the loading
    /// pass.
    pub async fn is_drained(&self) -> bool {
        let west = self.area(Port::West).lock().await;
        let east = self.area(Port::East).lock().await;
        let deck = self.ferry.snapshot().await;
        west.is_empty() && east.is_empty() && deck.load == 0
    }
}

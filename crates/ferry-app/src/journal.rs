//! Event journal
//!
//! Every transition is logged as one `tracing` line and kept in memory so a
//! run can be summarized (and checked) afterwards. The journal has its own
//! lock, separate from every harbor resource.

use std::sync::Mutex;
use std::time::Duration;

use ferry_types::{Port, SimEvent, VehicleId};
use serde::Serialize;
use tokio::time::Instant;

/// An event and when it happened, relative to the start of the run
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    #[serde(rename = "at_ms", serialize_with = "as_millis")]
    pub at: Duration,
    #[serde(flatten)]
    pub event: SimEvent,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[derive(Debug)]
pub struct Journal {
    started: Instant,
    entries: Mutex<Vec<JournalEntry>>,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

impl Journal {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Log and keep `event`. The line is written while the journal lock is
    /// held, so log order and journal order agree.
    pub fn record(&self, event: SimEvent) {
        let at = self.started.elapsed();
        let mut entries = self.entries.lock().expect("journal mutex poisoned");
        match &event {
            SimEvent::FerryIdle { .. } => tracing::debug!(at_ms = at.as_millis() as u64, "{}", event),
            _ => tracing::info!(at_ms = at.as_millis() as u64, "{}", event),
        }
        entries.push(JournalEntry { at, event });
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn snapshot(&self) -> Vec<JournalEntry> {
        self.entries.lock().expect("journal mutex poisoned").clone()
    }

    pub fn events(&self) -> Vec<SimEvent> {
        self.entries
            .lock()
            .expect("journal mutex poisoned")
            .iter()
            .map(|e| e.event.clone())
            .collect()
    }

    /// Vehicle ids in the order they entered `port`'s waiting area
    pub fn queued_at(&self, port: Port) -> Vec<VehicleId> {
        self.filter_vehicles(|event| match event {
            SimEvent::VehicleQueued { vehicle, port: p, .. } if *p == port => Some(*vehicle),
            _ => None,
        })
    }

    /// Vehicle ids in the order they boarded at `port`
    pub fn loaded_at(&self, port: Port) -> Vec<VehicleId> {
        self.filter_vehicles(|event| match event {
            SimEvent::VehicleLoaded { vehicle, port: p, .. } if *p == port => Some(*vehicle),
            _ => None,
        })
    }

    fn filter_vehicles<F>(&self, f: F) -> Vec<VehicleId>
    where
        F: Fn(&SimEvent) -> Option<VehicleId>,
    {
        self.entries
            .lock()
            .expect("journal mutex poisoned")
            .iter()
            .filter_map(|e| f(&e.event))
            .collect()
    }
}

//! The ferry and its control loop
//!
//! Each round: unload, run a loading pass at the current port, then cross
//! (loaded, or empty towards waiting vehicles) or idle until the next
//! arrival. The loop never ends on its own; the runner aborts its task.

use std::convert::Infallible;
use std::sync::Arc;

use ferry_domain::model::FerryHold;
use ferry_domain::service::{admit_head, decide_departure, Admission, Departure};
use ferry_types::{Port, Result, SimEvent, Vehicle};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::harbor::Harbor;

/// State guarded by the ferry lock
#[derive(Debug)]
struct Deck {
    port: Port,
    hold: FerryHold,
}

#[derive(Debug)]
pub struct Ferry {
    deck: Mutex<Deck>,
}

/// Point-in-time copy of the ferry state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FerrySnapshot {
    pub port: Port,
    pub load: u32,
    pub capacity: u32,
}

impl Ferry {
    pub fn new(capacity: u32, port: Port) -> Self {
        Self {
            deck: Mutex::new(Deck {
                port,
                hold: FerryHold::new(capacity),
            }),
        }
    }

    pub async fn snapshot(&self) -> FerrySnapshot {
        let deck = self.deck.lock().await;
        FerrySnapshot {
            port: deck.port,
            load: deck.hold.load(),
            capacity: deck.hold.capacity(),
        }
    }
}

/// What one round of the control loop did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// Port the round started at
    pub port: Port,
    pub unloaded: u32,
    pub boarded: Vec<Vehicle>,
    pub departure: Departure,
    /// Port the ferry is at when the round ends
    pub now_at: Port,
}

/// Run one round of the control loop
pub async fn run_round(harbor: &Harbor) -> Result<Round> {
    let ferry = harbor.ferry();
    let journal = harbor.journal();
    let timings = *harbor.timings();

    // Unloading
    let (port, unloaded) = {
        let mut deck = ferry.deck.lock().await;
        let mut unloaded = 0;
        if !deck.hold.is_empty() {
            journal.record(SimEvent::FerryUnloading {
                port: deck.port,
                load: deck.hold.load(),
            });
            sleep(timings.unload).await;
            unloaded = deck.hold.unload();
        }
        (deck.port, unloaded)
    };

    // Loading: waiting area first, then ferry. Only this task moves the
    // ferry, so `port` is still current once both locks are held.
    let mut boarded = Vec::new();
    {
        let mut queue = harbor.area(port).lock().await;
        let mut deck = ferry.deck.lock().await;
        while let Admission::Boarded(vehicle) = admit_head(&mut queue, &mut deck.hold, port)? {
            journal.record(SimEvent::VehicleLoaded {
                vehicle: vehicle.id,
                class: vehicle.class,
                port,
                load: deck.hold.load(),
            });
            boarded.push(vehicle);
            sleep(timings.load).await;
        }
    }

    // Decision
    let waiting_across = harbor.area(port.opposite()).size().await;
    let departure = decide_departure(boarded.len(), waiting_across);

    let now_at = match departure {
        Departure::Loaded | Departure::Reposition => cross(harbor, port).await,
        Departure::Stay => {
            journal.record(SimEvent::FerryIdle { port });
            harbor.wait_for_arrival(timings.idle).await;
            port
        }
    };

    Ok(Round {
        port,
        unloaded,
        boarded,
        departure,
        now_at,
    })
}

async fn cross(harbor: &Harbor, from: Port) -> Port {
    let to = from.opposite();
    let load = harbor.ferry().snapshot().await.load;
    harbor
        .journal()
        .record(SimEvent::FerryDeparted { from, to, load });

    sleep(harbor.timings().crossing).await;

    harbor.ferry().deck.lock().await.port = to;
    harbor.journal().record(SimEvent::FerryArrived { port: to });
    to
}

/// The ferry's control loop. Returns only on an invariant violation.
pub async fn run(harbor: Arc<Harbor>) -> Result<Infallible> {
    let start = harbor.ferry().snapshot().await;
    harbor.journal().record(SimEvent::FerryStarted {
        port: start.port,
        capacity: start.capacity,
    });

    loop {
        if let Err(e) = run_round(&harbor).await {
            tracing::error!("ferry stopped: {}", e);
            return Err(e);
        }
    }
}

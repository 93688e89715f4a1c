//! Simulation events

use serde::{Deserialize, Serialize};

use crate::{GateId, Port, VehicleClass, VehicleId};

/// A significant state transition, one log line each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    FerryStarted {
        port: Port,
        capacity: u32,
    },
    VehicleStarted {
        vehicle: VehicleId,
        class: VehicleClass,
        port: Port,
    },
    TollPassed {
        vehicle: VehicleId,
        gate: GateId,
    },
    VehicleQueued {
        vehicle: VehicleId,
        port: Port,
        queue_len: usize,
    },
    FerryUnloading {
        port: Port,
        load: u32,
    },
    VehicleLoaded {
        vehicle: VehicleId,
        class: VehicleClass,
        port: Port,
        load: u32,
    },
    FerryDeparted {
        from: Port,
        to: Port,
        load: u32,
    },
    FerryArrived {
        port: Port,
    },
    FerryIdle {
        port: Port,
    },
}

impl std::fmt::Display for SimEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimEvent::FerryStarted { port, capacity } => {
                write!(f, "Ferry started at {} (capacity {})", port, capacity)
            }
            SimEvent::VehicleStarted { vehicle, class, port } => {
                write!(f, "Vehicle {} ({}) started at {}", vehicle, class, port)
            }
            SimEvent::TollPassed { vehicle, gate } => {
                write!(f, "Vehicle {} passed {}", vehicle, gate)
            }
            SimEvent::VehicleQueued { vehicle, port, queue_len } => {
                write!(
                    f,
                    "Vehicle {} entered the waiting area at {} ({} waiting)",
                    vehicle, port, queue_len
                )
            }
            SimEvent::FerryUnloading { port, load } => {
                write!(f, "Ferry unloading {} units at {}", load, port)
            }
            SimEvent::VehicleLoaded { vehicle, class, port, load } => {
                write!(
                    f,
                    "Vehicle {} ({}) loaded at {}, ferry load {}",
                    vehicle, class, port, load
                )
            }
            SimEvent::FerryDeparted { from, to, load } if *load == 0 => {
                write!(f, "Ferry leaving {} empty for {}", from, to)
            }
            SimEvent::FerryDeparted { from, to, load } => {
                write!(f, "Ferry leaving {} for {} with {} units", from, to, load)
            }
            SimEvent::FerryArrived { port } => write!(f, "Ferry arrived at {}", port),
            SimEvent::FerryIdle { port } => {
                write!(f, "Ferry idle at {}, no vehicles waiting", port)
            }
        }
    }
}

//! Vehicles, ports and toll gates

use serde::{Deserialize, Serialize};

/// Number of ports the ferry shuttles between
pub const PORT_COUNT: usize = 2;

/// Toll gates in front of each waiting area
pub const GATES_PER_PORT: u8 = 2;

/// Unique vehicle identifier, assigned sequentially from 0
pub type VehicleId = u32;

/// Vehicle size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Car,
    Minibus,
    Truck,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [VehicleClass::Car, VehicleClass::Minibus, VehicleClass::Truck];

    /// Capacity units this class occupies on the ferry
    pub fn units(&self) -> u32 {
        match self {
            VehicleClass::Car => 1,
            VehicleClass::Minibus => 2,
            VehicleClass::Truck => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Minibus => "minibus",
            VehicleClass::Truck => "truck",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the two ferry ports.
///
/// Serialized as its index (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Port {
    West,
    East,
}

impl Port {
    pub const ALL: [Port; PORT_COUNT] = [Port::West, Port::East];

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Port::West),
            1 => Some(Port::East),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Port::West => 0,
            Port::East => 1,
        }
    }

    /// The port across the water
    pub fn opposite(&self) -> Self {
        match self {
            Port::West => Port::East,
            Port::East => Port::West,
        }
    }
}

impl TryFrom<u8> for Port {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Port::from_index(value).ok_or_else(|| format!("port must be 0 or 1, got {}", value))
    }
}

impl From<Port> for u8 {
    fn from(port: Port) -> Self {
        port.index() as u8
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "port {}", self.index())
    }
}

/// Toll gate identifier.
///
/// Gates are numbered across both ports: gates `0..GATES_PER_PORT` serve
/// port 0, the next `GATES_PER_PORT` serve port 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateId(pub u8);

impl GateId {
    /// Gate `slot` (0-based) of `port`. Slots wrap around, so the result
    /// is always one of `port`'s gates.
    pub fn new(port: Port, slot: u8) -> Self {
        GateId(port.index() as u8 * GATES_PER_PORT + slot % GATES_PER_PORT)
    }

    /// Port this gate feeds into
    pub fn port(&self) -> Port {
        if self.0 < GATES_PER_PORT {
            Port::West
        } else {
            Port::East
        }
    }
}

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gate {}", self.0)
    }
}

/// A vehicle waiting to cross.
///
/// All fields are fixed at creation; the gate is always one of the origin
/// port's gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub class: VehicleClass,
    pub origin: Port,
    pub gate: GateId,
}

impl Vehicle {
    pub fn new(id: VehicleId, class: VehicleClass, origin: Port, gate_slot: u8) -> Self {
        Self {
            id,
            class,
            origin,
            gate: GateId::new(origin, gate_slot),
        }
    }

    pub fn units(&self) -> u32 {
        self.class.units()
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vehicle {} ({})", self.id, self.class)
    }
}

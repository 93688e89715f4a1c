//! Vehicle roster generation

use ferry_types::{Port, Vehicle, VehicleClass, GATES_PER_PORT};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How many vehicles of each class take part in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    pub cars: u32,
    pub minibuses: u32,
    pub trucks: u32,
}

impl Fleet {
    pub fn count(&self, class: VehicleClass) -> u32 {
        match class {
            VehicleClass::Car => self.cars,
            VehicleClass::Minibus => self.minibuses,
            VehicleClass::Truck => self.trucks,
        }
    }

    /// Vehicle count, or `None` if it does not fit in a vehicle id
    pub fn total(&self) -> Option<u32> {
        self.cars
            .checked_add(self.minibuses)?
            .checked_add(self.trucks)
    }
}

/// The vehicles of one run, in id order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    vehicles: Vec<Vehicle>,
}

impl Roster {
    /// Cars first, then minibuses, then trucks, ids counting up from 0.
    /// Each vehicle draws its origin port and one of that port's gates.
    ///
    /// `fleet` must have a [`Fleet::total`]; config validation checks this.
    pub fn generate<R: Rng + ?Sized>(fleet: &Fleet, rng: &mut R) -> Self {
        let mut vehicles = Vec::with_capacity(fleet.total().unwrap_or(0) as usize);
        for class in VehicleClass::ALL {
            for _ in 0..fleet.count(class) {
                let origin = random_port(rng);
                let slot = rng.gen_range(0..GATES_PER_PORT);
                vehicles.push(Vehicle::new(vehicles.len() as u32, class, origin, slot));
            }
        }
        Self { vehicles }
    }

    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[cfg(test)]
impl Roster {
    fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }
}

impl IntoIterator for Roster {
    type Item = Vehicle;
    type IntoIter = std::vec::IntoIter<Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.into_iter()
    }
}

pub fn random_port<R: Rng + ?Sized>(rng: &mut R) -> Port {
    if rng.gen_bool(0.5) {
        Port::East
    } else {
        Port::West
    }
}

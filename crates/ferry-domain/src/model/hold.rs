//! Ferry hold: capacity bookkeeping

use ferry_types::InvariantViolation;
use serde::{Deserialize, Serialize};

/// Units occupied on the ferry deck.
///
/// `load` only grows through [`FerryHold::board`] and only drops, all the
/// way to zero, through [`FerryHold::unload`]. `load <= capacity` holds
/// after every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FerryHold {
    capacity: u32,
    load: u32,
}

impl FerryHold {
    pub fn new(capacity: u32) -> Self {
        Self { capacity, load: 0 }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn load(&self) -> u32 {
        self.load
    }

    pub fn remaining(&self) -> u32 {
        self.capacity - self.load
    }

    pub fn is_empty(&self) -> bool {
        self.load == 0
    }

    pub fn fits(&self, units: u32) -> bool {
        units <= self.remaining()
    }

    /// Put `units` on deck, refusing anything that would overflow
    pub fn board(&mut self, units: u32) -> Result<(), InvariantViolation> {
        match self.load.checked_add(units) {
            Some(next) if next <= self.capacity => {
                self.load = next;
                Ok(())
            }
            _ => Err(InvariantViolation::CapacityExceeded {
                load: self.load,
                units,
                capacity: self.capacity,
            }),
        }
    }

    /// Empty the deck, returning how many units came off
    pub fn unload(&mut self) -> u32 {
        std::mem::take(&mut self.load)
    }
}

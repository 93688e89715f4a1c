//! Travel-or-stay decision after a loading pass

use serde::{Deserialize, Serialize};

/// What the ferry does after loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Departure {
    /// Vehicles boarded: cross with them
    Loaded,
    /// Nothing boarded here but vehicles wait across: cross empty
    Reposition,
    /// Nothing to do on either side
    Stay,
}

/// `loaded_count` is how many vehicles the last pass boarded,
/// `waiting_across` the queue length at the other port.
pub fn decide_departure(loaded_count: usize, waiting_across: usize) -> Departure {
    if loaded_count > 0 {
        Departure::Loaded
    } else if waiting_across > 0 {
        Departure::Reposition
    } else {
        Departure::Stay
    }
}

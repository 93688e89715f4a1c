//! Head-of-queue loading pass
//!
//! Vehicles board strictly in queue order. The pass ends at the first
//! vehicle that does not fit; nothing behind it is considered, even if it
//! would fit.

use std::collections::VecDeque;

use ferry_types::{InvariantViolation, Port, Vehicle};

use crate::model::FerryHold;

/// Outcome of testing the head of a waiting queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Head fit and was moved onto the ferry
    Boarded(Vehicle),
    /// Head does not fit into the remaining capacity; it stays queued
    Blocked(Vehicle),
    /// Queue is empty
    Empty,
    /// No capacity left
    Full,
}

/// Test the head of `queue` against the hold, boarding it if it fits.
///
/// `port` is where the ferry is docked; a queued vehicle from the other
/// port means the queues were mixed up.
pub fn admit_head(
    queue: &mut VecDeque<Vehicle>,
    hold: &mut FerryHold,
    port: Port,
) -> Result<Admission, InvariantViolation> {
    if hold.remaining() == 0 {
        return Ok(Admission::Full);
    }
    let Some(head) = queue.front().copied() else {
        return Ok(Admission::Empty);
    };
    if head.origin != port {
        return Err(InvariantViolation::WrongPort {
            vehicle: head.id,
            queued_at: head.origin.index() as u8,
            boarded_at: port.index() as u8,
        });
    }
    if !hold.fits(head.units()) {
        return Ok(Admission::Blocked(head));
    }

    hold.board(head.units())?;
    queue.pop_front();
    Ok(Admission::Boarded(head))
}

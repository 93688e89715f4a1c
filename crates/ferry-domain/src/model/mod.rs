//! Domain model types

pub mod hold;
pub mod roster;

pub use hold::FerryHold;
pub use roster::{Fleet, Roster};

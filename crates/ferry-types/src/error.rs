//! Error types for ferry-crossing

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Broken protocol invariants.
///
/// These indicate a synchronization bug, never a recoverable condition.
/// A simulation that hits one is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("ferry load {load} + {units} units exceeds capacity {capacity}")]
    CapacityExceeded { load: u32, units: u32, capacity: u32 },

    #[error("vehicle {vehicle} boarded at port {boarded_at} but queued at port {queued_at}")]
    WrongPort {
        vehicle: u32,
        queued_at: u8,
        boarded_at: u8,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("Task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, Error>;

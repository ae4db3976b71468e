//! Application-level error type.

use thiserror::Error;

use crate::location::LocationError;
use crate::map::MapError;
use crate::store::StoreError;

/// Errors surfaced during bootstrap or front-end operations.
///
/// Steady-state sensor errors do not pass through here; they stay in the
/// UI mode machine as error panels.
#[derive(Debug, Error)]
pub enum AppError {
    /// The sensor backend could not be constructed.
    #[error("sensor setup failed: {0}")]
    Sensor(#[from] LocationError),

    /// Writing the persisted record failed where it had to succeed.
    #[error("persistence error: {0}")]
    Store(#[from] StoreError),

    /// Snapshot rendering failed.
    #[error("map error: {0}")]
    Map(#[from] MapError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

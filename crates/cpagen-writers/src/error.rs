//! Error types for file emission.

use thiserror::Error;

/// Errors that can occur while writing an output file.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The waypoint sequence is too short for the format.
    #[error("Waypoint sequence must contain at least {expected} points, got {actual}")]
    TooFewWaypoints { expected: usize, actual: usize },
}

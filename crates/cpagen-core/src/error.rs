//! Error types for scenario validation.

use thiserror::Error;

/// Errors raised when a [`crate::types::ConflictScenario`] cannot be solved.
///
/// The solver either returns a complete, internally self-consistent solution
/// or fails with one of these before any vector algebra runs. Degenerate
/// relative motion is NOT an error — it is a handled branch flagged on the
/// solution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// TCPA must be strictly positive.
    #[error("Invalid scenario: tcpa_sec must be > 0, got {tcpa_sec}")]
    NonPositiveTcpa { tcpa_sec: f64 },

    /// A required numeric input is NaN or infinite.
    #[error("Invalid scenario: {field} is not finite")]
    NonFiniteInput { field: &'static str },

    /// A magnitude field that must be non-negative is negative.
    #[error("Invalid scenario: {field} must be >= 0, got {value}")]
    NegativeMagnitude { field: &'static str, value: f64 },
}

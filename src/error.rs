/*
 * Error Module
 *
 * Error types for the simulation core and for the persisted parameter file.
 * Construction-time invariant violations are reported through these; steady-state
 * numeric edge cases never are.
 */

use thiserror::Error;

/// Errors raised when constructing simulation values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A value that can never be valid (NaN component, non-positive radius, ...).
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Explicit division of a vector by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Errors raised while loading or saving the parameter file.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("parameter file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("parameter file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

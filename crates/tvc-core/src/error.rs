//! Error types for time-varying connectivity derivation
//!
//! Provides a unified error type for all tvc crates.
//!
//! Numerical degeneracies (zero-variance nodes, zero-weight windows) are not
//! errors: they surface as NaN entries in the resulting tensor. Only
//! configuration and input-shape problems are reported through [`Error`].

use thiserror::Error;

/// Core error type for connectivity derivation
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown method, distribution, metric or transform, or a missing or
    /// mismatched parameter
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Report serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a parameter the selected method requires
    pub fn missing_parameter(parameter: &str, method: &str) -> Self {
        Self::Configuration(format!(
            "parameter '{parameter}' is required for method '{method}'"
        ))
    }

    /// Create an error for an unrecognised name in one of the registries
    pub fn unknown(kind: &str, name: &str, known: &[&str]) -> Self {
        Self::Configuration(format!(
            "unknown {kind} '{name}', expected one of: {}",
            known.join(", ")
        ))
    }

    /// Create an error for a window that does not fit the series
    pub fn window_too_large(windowsize: usize, length: usize) -> Self {
        Self::Configuration(format!(
            "windowsize {windowsize} exceeds series length {length}"
        ))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::Configuration(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }
}

//! Error types for the HistFactory kernels

use thiserror::Error;

/// Kernel error type
#[derive(Error, Debug)]
pub enum Error {
    /// Operand vectors of unequal length
    #[error("Shape error: {what} has length {got}, expected {expected}")]
    Shape {
        /// Which operand was mismatched
        what: &'static str,
        /// Length of the reference operand
        expected: usize,
        /// Length actually supplied
        got: usize,
    },

    /// Argument outside the domain of a log (non-positive factor or rate)
    #[error("Domain error: {what} must be > 0, got {value} at bin {index}")]
    Domain {
        /// Which operand was out of domain
        what: &'static str,
        /// Bin index of the offending value
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

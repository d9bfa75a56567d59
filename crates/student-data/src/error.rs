//! Validation Error Types

use thiserror::Error;

/// Errors during metrics validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value must be non-negative
    #[error("{field} value {value} must be non-negative")]
    Negative { field: &'static str, value: f64 },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

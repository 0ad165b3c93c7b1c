//! Error types for statistical operations.

use thiserror::Error;

/// A specialized Result type for statistical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during statistical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Probability outside the closed unit interval.
    #[error("Probability {p} is outside [0, 1]")]
    InvalidProbability {
        /// The offending probability.
        p: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::insufficient_data(2, 1);
        assert_eq!(err.to_string(), "Insufficient data: need at least 2, got 1");
    }
}

//! Error types for risk calculations.

use tailrisk_core::Date;
use tailrisk_math::MathError;
use thiserror::Error;

/// A specialized Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk calculations.
///
/// All variants are input validation failures: retrying with the same
/// input yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Fewer observations than the calculation needs.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum number of observations.
        required: usize,
        /// Observations supplied.
        actual: usize,
    },

    /// Confidence level outside the open interval (0, 1).
    #[error("invalid confidence level {alpha}: must lie strictly between 0 and 1")]
    InvalidConfidenceLevel {
        /// The rejected confidence level.
        alpha: f64,
    },

    /// No loss at or beyond the VaR threshold.
    #[error("empty tail at confidence level {alpha}: no loss >= VaR {var}")]
    EmptyTail {
        /// Confidence level.
        alpha: f64,
        /// VaR threshold that no observation reached.
        var: f64,
    },

    /// Portfolio value that has no logarithm.
    #[error("non-positive portfolio value {value} on {date}")]
    NonPositiveValue {
        /// Date of the offending value.
        date: Date,
        /// The value itself.
        value: f64,
    },

    /// Invalid input parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<MathError> for RiskError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                RiskError::InsufficientData { required, actual }
            }
            MathError::InvalidProbability { p } => RiskError::InvalidConfidenceLevel { alpha: p },
            MathError::InvalidInput { reason } => RiskError::InvalidInput(reason),
        }
    }
}

//! Error types for core domain types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing or validating domain types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid or unparseable date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Invalid instrument symbol.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// A price that is zero, negative or not finite.
    #[error("Invalid price for {symbol} on {date}: {price}")]
    InvalidPrice {
        /// Instrument the price belongs to.
        symbol: String,
        /// Observation date.
        date: String,
        /// Offending price.
        price: f64,
    },

    /// Dates are duplicated or out of chronological order.
    #[error("Unordered series for {symbol}: {date} does not follow {previous}")]
    UnorderedSeries {
        /// Instrument the series belongs to.
        symbol: String,
        /// Previous observation date.
        previous: String,
        /// Date that breaks the ordering.
        date: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }
}

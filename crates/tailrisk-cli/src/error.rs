//! CLI error types.

use thiserror::Error;

use tailrisk_config::ConfigError;
use tailrisk_core::CoreError;
use tailrisk_risk::RiskError;
use tailrisk_traits::TraitError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Malformed loss input.
    #[error("Invalid loss input: {0}")]
    InvalidLosses(String),

    /// No date on which every holding has a price.
    #[error("No common price history for {0}")]
    NoCommonHistory(String),

    /// Some confidence levels could not be estimated.
    #[error("{failed} of {total} confidence levels could not be estimated")]
    LevelsFailed {
        /// Levels that failed.
        failed: usize,
        /// Levels requested.
        total: usize,
    },

    /// Date out of the representable range.
    #[error("Date error: {0}")]
    Date(#[from] CoreError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Price source error.
    #[error("Price data error: {0}")]
    Source(#[from] TraitError),

    /// Calculation error.
    #[error("Calculation error: {0}")]
    Calculation(#[from] RiskError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

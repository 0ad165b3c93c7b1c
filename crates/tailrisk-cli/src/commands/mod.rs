//! CLI command implementations.

pub mod estimate;
pub mod report;

// Re-export submodules for convenience
pub use estimate::EstimateArgs;
pub use report::ReportArgs;

use tailrisk_core::Date;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

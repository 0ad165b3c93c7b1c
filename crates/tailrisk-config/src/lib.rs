//! Tailrisk Configuration Layer
//!
//! Describes one risk report: the portfolio (share counts per symbol), the
//! confidence levels, the historical lookback window and how currency
//! amounts are scaled.
//!
//! # Example
//!
//! ```rust
//! use tailrisk_config::{RiskReportConfig, Validate};
//!
//! let config = RiskReportConfig::from_toml_str(r#"
//!     name = "tech-basket"
//!     lookback_days = 365
//!
//!     [shares]
//!     AAPL = 10
//!     MSFT = 5
//! "#).unwrap();
//!
//! assert_eq!(config.confidence_levels, vec![0.95, 0.99]);
//! assert_eq!(config.holdings().len(), 2);
//! assert!(config.is_valid());
//! ```
//!
//! # Formats
//!
//! [`RiskReportConfig::from_file`] picks the parser from the file extension:
//! `.toml` or `.json`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod report;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use report::{ReferenceValue, RiskReportConfig, DEFAULT_LOOKBACK_DAYS};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::report::{ReferenceValue, RiskReportConfig};
}

//! # Tailrisk Core
//!
//! Domain types shared by every Tailrisk crate.
//!
//! - [`Date`]: calendar date newtype over `chrono::NaiveDate`
//! - [`Symbol`]: instrument ticker
//! - [`PriceSeries`]: validated, chronologically ordered adjusted-close history
//! - [`Holding`]: a fixed share count in one instrument
//!
//! ## Example
//!
//! ```rust
//! use tailrisk_core::prelude::*;
//!
//! let d0 = Date::parse("2024-01-02").unwrap();
//! let series = PriceSeries::new(
//!     Symbol::new("AAPL").unwrap(),
//!     vec![PricePoint::new(d0, 185.6), PricePoint::new(d0.add_days(1), 184.3)],
//! )
//! .unwrap();
//! assert_eq!(series.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{Date, Holding, PricePoint, PriceSeries, Symbol};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Holding, PricePoint, PriceSeries, Symbol};
}

//! # Tailrisk Ext File
//!
//! File-based and in-memory price history sources.
//!
//! - [`CsvPriceSource`]: adjusted closes from a CSV file, long
//!   (`date,symbol,adj_close`) or wide (`date,AAPL,MSFT,...`) layout
//! - [`InMemoryPriceSource`]: histories held in memory, for tests and
//!   embedding
//!
//! For live vendor data, implement
//! [`PriceHistorySource`](tailrisk_traits::PriceHistorySource) in a
//! separate extension crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csv_source;
mod memory;

pub use csv_source::{parse_prices, CsvPriceSource};
pub use memory::InMemoryPriceSource;

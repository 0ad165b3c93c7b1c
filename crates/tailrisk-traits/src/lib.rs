//! # Tailrisk Traits
//!
//! Trait definitions for the data Tailrisk consumes.
//!
//! This crate contains ONLY trait definitions with no runtime dependencies.
//! Implementations live in extension crates (`tailrisk-ext-file`).
//!
//! ## Module Structure
//!
//! - [`market_data`]: Price history sources
//! - [`error`]: Errors shared by all sources
//!
//! ## Dependency Injection
//!
//! Reports take a source by trait object, so file, in-memory and network
//! sources are interchangeable:
//!
//! ```ignore
//! let source: Arc<dyn PriceHistorySource> = Arc::new(CsvPriceSource::new("prices.csv")?);
//! let histories = source.get_histories(&symbols, start, end).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;

pub use error::TraitError;
pub use market_data::{PriceHistorySource, SourceType};

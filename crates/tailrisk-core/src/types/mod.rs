//! Domain types for historical risk calculations.

mod date;
mod holding;
mod price_series;
mod symbol;

pub use date::Date;
pub use holding::Holding;
pub use price_series::{PricePoint, PriceSeries};
pub use symbol::Symbol;

//! Portfolio holding.

use serde::{Deserialize, Serialize};

use super::Symbol;

/// A fixed number of shares held in one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Holding {
    /// Instrument held.
    pub symbol: Symbol,
    /// Share count. Zero is allowed and contributes nothing to value.
    pub shares: u64,
}

impl Holding {
    /// Creates a new holding.
    pub fn new(symbol: Symbol, shares: u64) -> Self {
        Self { symbol, shares }
    }

    /// Market value of the holding at `price`.
    #[must_use]
    pub fn value_at(&self, price: f64) -> f64 {
        self.shares as f64 * price
    }
}

//! In-memory price history source.

use async_trait::async_trait;
use dashmap::DashMap;

use tailrisk_core::{Date, PriceSeries, Symbol};
use tailrisk_traits::error::TraitError;
use tailrisk_traits::market_data::{PriceHistorySource, SourceType};

/// Price histories held in memory.
#[derive(Debug, Default)]
pub struct InMemoryPriceSource {
    histories: DashMap<Symbol, PriceSeries>,
}

impl InMemoryPriceSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source holding `histories`.
    pub fn from_series(histories: impl IntoIterator<Item = PriceSeries>) -> Self {
        let source = Self::new();
        for series in histories {
            source.insert(series);
        }
        source
    }

    /// Add or replace the history for its symbol.
    pub fn insert(&self, series: PriceSeries) {
        self.histories.insert(series.symbol().clone(), series);
    }

    /// Number of symbols held.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Returns true if no history is held.
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

#[async_trait]
impl PriceHistorySource for InMemoryPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    async fn symbols(&self) -> Result<Vec<Symbol>, TraitError> {
        let mut symbols: Vec<Symbol> = self.histories.iter().map(|e| e.key().clone()).collect();
        symbols.sort();
        Ok(symbols)
    }

    async fn get_history(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<PriceSeries, TraitError> {
        self.histories
            .get(symbol)
            .map(|series| series.window(start, end))
            .ok_or_else(|| TraitError::NotFound(format!("no price history for {symbol}")))
    }
}

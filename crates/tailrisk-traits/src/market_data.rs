//! Market data source traits.
//!
//! [`PriceHistorySource`] supplies adjusted-close histories per instrument
//! for a date range. Sources may be files, databases or vendor APIs; the
//! risk calculation only sees validated [`PriceSeries`] values.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use tailrisk_core::{Date, PriceSeries, Symbol};

/// Source type for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Snapshot/request-response (REST APIs)
    Snapshot,
    /// File-based (CSV, JSON)
    File,
    /// Database (for historical/EOD)
    Database,
    /// Held in memory (tests, embedding)
    Memory,
}

/// Trait for historical price providers.
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Symbols this source can serve.
    async fn symbols(&self) -> Result<Vec<Symbol>, TraitError>;

    /// History for one instrument with `start <= date <= end`.
    ///
    /// Returns `TraitError::NotFound` if the source has no data for the
    /// symbol at all. An empty series means the symbol exists but has no
    /// observation in range.
    async fn get_history(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<PriceSeries, TraitError>;

    /// Histories for several instruments, in the order requested.
    async fn get_histories(
        &self,
        symbols: &[Symbol],
        start: Date,
        end: Date,
    ) -> Result<Vec<PriceSeries>, TraitError> {
        let mut histories = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            histories.push(self.get_history(symbol, start, end).await?);
        }
        Ok(histories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailrisk_core::PricePoint;

    struct SingleDay;

    #[async_trait]
    impl PriceHistorySource for SingleDay {
        fn source_type(&self) -> SourceType {
            SourceType::Memory
        }

        async fn symbols(&self) -> Result<Vec<Symbol>, TraitError> {
            Ok(vec![Symbol::new("AAA")?])
        }

        async fn get_history(
            &self,
            symbol: &Symbol,
            start: Date,
            _end: Date,
        ) -> Result<PriceSeries, TraitError> {
            if symbol.as_str() != "AAA" {
                return Err(TraitError::NotFound(symbol.to_string()));
            }
            Ok(PriceSeries::new(
                symbol.clone(),
                vec![PricePoint::new(start, 1.0)],
            )?)
        }
    }

    #[tokio::test]
    async fn test_default_get_histories_preserves_order_and_errors() {
        let source = SingleDay;
        let day = Date::from_ymd(2024, 1, 2).unwrap();
        let aaa = Symbol::new("AAA").unwrap();

        let histories = source
            .get_histories(&[aaa.clone(), aaa.clone()], day, day)
            .await
            .unwrap();
        assert_eq!(histories.len(), 2);

        let missing = source
            .get_histories(&[aaa, Symbol::new("ZZZ").unwrap()], day, day)
            .await;
        assert!(matches!(missing, Err(TraitError::NotFound(s)) if s == "ZZZ"));
    }
}

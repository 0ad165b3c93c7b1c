//! CSV price history source.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;

use tailrisk_core::{Date, PricePoint, PriceSeries, Symbol};
use tailrisk_traits::error::TraitError;
use tailrisk_traits::market_data::{PriceHistorySource, SourceType};

// =============================================================================
// PARSING
// =============================================================================

/// CSV record for the long layout.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    date: String,
    symbol: String,
    #[serde(alias = "price", alias = "close")]
    adj_close: f64,
}

/// Parses adjusted closes from CSV.
///
/// Two layouts are accepted, told apart by the header:
///
/// - long: `date,symbol,adj_close` (one row per observation; `price` and
///   `close` are accepted as the price column name)
/// - wide: `date,AAPL,MSFT,...` (one row per date, one column per symbol;
///   empty cells mean no observation)
///
/// Rows may appear in any date order. Each returned series is validated.
pub fn parse_prices<R: Read>(reader: R) -> Result<Vec<PriceSeries>, TraitError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| TraitError::ParseError(e.to_string()))?
        .clone();

    if !headers.get(0).is_some_and(|h| h.eq_ignore_ascii_case("date")) {
        return Err(TraitError::ParseError(
            "first column must be 'date'".to_string(),
        ));
    }

    let mut points: BTreeMap<Symbol, Vec<PricePoint>> = BTreeMap::new();

    if headers.iter().any(|h| h.eq_ignore_ascii_case("symbol")) {
        for result in reader.deserialize() {
            let record: PriceRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            let date = Date::parse(&record.date)?;
            points
                .entry(Symbol::new(&record.symbol)?)
                .or_default()
                .push(PricePoint::new(date, record.adj_close));
        }
    } else {
        let symbols = headers
            .iter()
            .skip(1)
            .map(Symbol::new)
            .collect::<Result<Vec<_>, _>>()?;

        for result in reader.records() {
            let record = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            let date = Date::parse(record.get(0).unwrap_or_default())?;
            for (symbol, cell) in symbols.iter().zip(record.iter().skip(1)) {
                if cell.is_empty() {
                    continue;
                }
                let price: f64 = cell.parse().map_err(|_| {
                    TraitError::ParseError(format!("bad price {cell:?} for {symbol} on {date}"))
                })?;
                points
                    .entry(symbol.clone())
                    .or_default()
                    .push(PricePoint::new(date, price));
            }
        }
    }

    points
        .into_iter()
        .map(|(symbol, points)| PriceSeries::from_unsorted(symbol, points).map_err(Into::into))
        .collect()
}

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV-based price history source for EOD files.
pub struct CsvPriceSource {
    file_path: PathBuf,
    histories: DashMap<Symbol, PriceSeries>,
}

impl CsvPriceSource {
    /// Create a new CSV price source and load the file.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            histories: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload histories from file, replacing what is held.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            return Err(TraitError::SourceNotAvailable(format!(
                "price file {} does not exist",
                self.file_path.display()
            )));
        }

        let file = std::fs::File::open(&self.file_path)?;
        let histories = parse_prices(file)?;

        self.histories.clear();
        for series in histories {
            log::debug!(
                "loaded {} prices for {} from {}",
                series.len(),
                series.symbol(),
                self.file_path.display()
            );
            self.histories.insert(series.symbol().clone(), series);
        }

        Ok(())
    }

    /// Path the source reads from.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl PriceHistorySource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
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
            .ok_or_else(|| {
                TraitError::NotFound(format!(
                    "no prices for {symbol} in {}",
                    self.file_path.display()
                ))
            })
    }
}

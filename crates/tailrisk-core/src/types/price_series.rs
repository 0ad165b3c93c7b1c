//! Adjusted-close price history for one instrument.

use serde::{Deserialize, Serialize};

use super::{Date, Symbol};
use crate::error::{CoreError, CoreResult};

/// A single dated price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Adjusted close price.
    pub price: f64,
}

impl PricePoint {
    /// Creates a new price point.
    pub fn new(date: Date, price: f64) -> Self {
        Self { date, price }
    }
}

/// Chronologically ordered price history for one instrument.
///
/// Invariants, checked on construction:
/// - dates are strictly increasing (no duplicates)
/// - every price is finite and strictly positive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: Symbol,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a validated price series.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnorderedSeries` on duplicate or descending dates
    /// and `CoreError::InvalidPrice` on a non-positive or non-finite price.
    pub fn new(symbol: Symbol, points: Vec<PricePoint>) -> CoreResult<Self> {
        for (i, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(CoreError::InvalidPrice {
                    symbol: symbol.to_string(),
                    date: point.date.to_string(),
                    price: point.price,
                });
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(CoreError::UnorderedSeries {
                    symbol: symbol.to_string(),
                    previous: points[i - 1].date.to_string(),
                    date: point.date.to_string(),
                });
            }
        }

        Ok(Self { symbol, points })
    }

    /// Creates a series from unordered observations, sorting by date first.
    ///
    /// Duplicate dates are still rejected.
    pub fn from_unsorted(symbol: Symbol, mut points: Vec<PricePoint>) -> CoreResult<Self> {
        points.sort_by_key(|p| p.date);
        Self::new(symbol, points)
    }

    /// Instrument this history belongs to.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// All observations in date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First observation, if any.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Most recent observation, if any.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Price on `date`, if observed.
    pub fn price_on(&self, date: Date) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].price)
    }

    /// Iterator over observation dates.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Sub-series with `start <= date <= end`.
    #[must_use]
    pub fn window(&self, start: Date, end: Date) -> Self {
        let lo = self.points.partition_point(|p| p.date < start);
        let hi = self.points.partition_point(|p| p.date <= end);
        let points = if lo < hi {
            self.points[lo..hi].to_vec()
        } else {
            Vec::new()
        };
        Self {
            symbol: self.symbol.clone(),
            points,
        }
    }

    /// Sub-series covering the `lookback_days` calendar days up to and
    /// including `end`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the window would start before
    /// [`Date::MIN`].
    pub fn trailing(&self, end: Date, lookback_days: u32) -> CoreResult<Self> {
        let start = end.checked_add_days(-i64::from(lookback_days))?;
        Ok(self.window(start, end))
    }
}

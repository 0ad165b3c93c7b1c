//! Portfolio value, log-return and loss series.
//!
//! The pipeline is:
//!
//! ```text
//! aligned prices x shares -> PortfolioValueSeries -> ReturnSeries -> LossSeries
//! ```
//!
//! Portfolio values exist only on dates every constituent has a price for
//! (an inner join). Returns are `ln(v_t) - ln(v_{t-1})`, dated by `t`.

use serde::Serialize;

use tailrisk_core::{Date, Holding, PriceSeries};

use crate::{RiskError, RiskResult};

/// Dated scalar series shared by the value, return and loss series.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct DatedValues {
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl DatedValues {
    fn new(dates: Vec<Date>, values: Vec<f64>) -> RiskResult<Self> {
        if dates.len() != values.len() {
            return Err(RiskError::InvalidInput(format!(
                "dates and values must have same length: {} vs {}",
                dates.len(),
                values.len()
            )));
        }
        if let Some(w) = dates.windows(2).find(|w| w[1] <= w[0]) {
            return Err(RiskError::InvalidInput(format!(
                "dates must be strictly increasing: {} follows {}",
                w[1], w[0]
            )));
        }
        Ok(Self { dates, values })
    }
}

/// Portfolio market value per date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PortfolioValueSeries(DatedValues);

impl PortfolioValueSeries {
    /// Creates a value series from parallel date and value vectors.
    ///
    /// Values are not checked for sign here; [`log_returns`] rejects
    /// non-positive values with the date they occur on.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidInput` if lengths differ or dates are not
    /// strictly increasing.
    pub fn new(dates: Vec<Date>, values: Vec<f64>) -> RiskResult<Self> {
        DatedValues::new(dates, values).map(Self)
    }

    /// Observation dates.
    pub fn dates(&self) -> &[Date] {
        &self.0.dates
    }

    /// Portfolio values, aligned with [`dates`](Self::dates).
    pub fn values(&self) -> &[f64] {
        &self.0.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.0.values.len()
    }

    /// Returns true if there are no observations.
    pub fn is_empty(&self) -> bool {
        self.0.values.is_empty()
    }

    /// Most recent `(date, value)`, the usual reference for currency VaR.
    pub fn latest(&self) -> Option<(Date, f64)> {
        self.0.dates.last().copied().zip(self.0.values.last().copied())
    }
}

/// Daily logarithmic returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReturnSeries(DatedValues);

impl ReturnSeries {
    /// Return dates (the later date of each pair).
    pub fn dates(&self) -> &[Date] {
        &self.0.dates
    }

    /// Log returns.
    pub fn values(&self) -> &[f64] {
        &self.0.values
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.0.values.len()
    }

    /// Returns true if there are no returns.
    pub fn is_empty(&self) -> bool {
        self.0.values.is_empty()
    }

    /// Negated returns: positive when the portfolio fell.
    #[must_use]
    pub fn losses(&self) -> LossSeries {
        LossSeries(DatedValues {
            dates: self.0.dates.clone(),
            values: self.0.values.iter().map(|r| -r).collect(),
        })
    }
}

/// Daily losses (negated log returns).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LossSeries(DatedValues);

impl LossSeries {
    /// Loss dates.
    pub fn dates(&self) -> &[Date] {
        &self.0.dates
    }

    /// Losses, in the order they occurred.
    pub fn values(&self) -> &[f64] {
        &self.0.values
    }

    /// Number of losses.
    pub fn len(&self) -> usize {
        self.0.values.len()
    }

    /// Returns true if there are no losses.
    pub fn is_empty(&self) -> bool {
        self.0.values.is_empty()
    }

    /// Largest single loss and its date.
    pub fn worst(&self) -> Option<(Date, f64)> {
        self.0
            .dates
            .iter()
            .zip(&self.0.values)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(d, v)| (*d, *v))
    }
}

/// Builds the portfolio value series from holdings and their price histories.
///
/// Only dates present in every history are kept. Each value is
/// `sum(shares_i * price_i)`.
///
/// # Errors
///
/// Returns `RiskError::InvalidInput` if no positions are given or a
/// holding is paired with another instrument's history.
pub fn portfolio_values(positions: &[(Holding, &PriceSeries)]) -> RiskResult<PortfolioValueSeries> {
    let Some(((_, anchor), rest)) = positions.split_first() else {
        return Err(RiskError::InvalidInput("no positions supplied".to_string()));
    };

    if let Some((holding, series)) = positions
        .iter()
        .find(|(holding, series)| &holding.symbol != series.symbol())
    {
        return Err(RiskError::InvalidInput(format!(
            "holding {} paired with price history for {}",
            holding.symbol,
            series.symbol()
        )));
    }

    let mut dates = Vec::with_capacity(anchor.len());
    let mut values = Vec::with_capacity(anchor.len());

    for date in anchor.dates() {
        if rest.iter().any(|(_, series)| series.price_on(date).is_none()) {
            continue;
        }
        let mut value = 0.0;
        for (holding, series) in positions {
            if let Some(price) = series.price_on(date) {
                value += holding.value_at(price);
            }
        }
        dates.push(date);
        values.push(value);
    }

    log::debug!(
        "aligned {} positions on {} common dates (anchor {} had {})",
        positions.len(),
        dates.len(),
        anchor.symbol(),
        anchor.len()
    );

    PortfolioValueSeries::new(dates, values)
}

/// Daily log returns of a portfolio value series.
///
/// # Errors
///
/// - `RiskError::InsufficientData` with fewer than 2 values
/// - `RiskError::NonPositiveValue` at the first value that is `<= 0` (or
///   not finite)
pub fn log_returns(values: &PortfolioValueSeries) -> RiskResult<ReturnSeries> {
    if values.len() < 2 {
        return Err(RiskError::InsufficientData {
            required: 2,
            actual: values.len(),
        });
    }

    if let Some((date, value)) = values
        .dates()
        .iter()
        .zip(values.values())
        .find(|(_, v)| !(v.is_finite() && **v > 0.0))
    {
        return Err(RiskError::NonPositiveValue {
            date: *date,
            value: *value,
        });
    }

    let returns = values
        .values()
        .windows(2)
        .map(|w| w[1].ln() - w[0].ln())
        .collect();

    Ok(ReturnSeries(DatedValues {
        dates: values.dates()[1..].to_vec(),
        values: returns,
    }))
}

/// Convenience: positions straight to losses.
pub fn portfolio_losses(positions: &[(Holding, &PriceSeries)]) -> RiskResult<LossSeries> {
    let values = portfolio_values(positions)?;
    Ok(log_returns(&values)?.losses())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tailrisk_core::{PricePoint, Symbol};

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn series(symbol: &str, points: &[(&str, f64)]) -> PriceSeries {
        PriceSeries::new(
            Symbol::new(symbol).unwrap(),
            points
                .iter()
                .map(|(date, price)| PricePoint::new(d(date), *price))
                .collect(),
        )
        .unwrap()
    }

    fn holding(symbol: &str, shares: u64) -> Holding {
        Holding::new(Symbol::new(symbol).unwrap(), shares)
    }

    #[test]
    fn test_weighted_sum_on_common_dates() {
        let aapl = series(
            "AAPL",
            &[("2024-01-02", 100.0), ("2024-01-03", 110.0), ("2024-01-04", 105.0)],
        );
        // MSFT is missing 2024-01-03
        let msft = series("MSFT", &[("2024-01-02", 50.0), ("2024-01-04", 55.0)]);

        let values =
            portfolio_values(&[(holding("AAPL", 2), &aapl), (holding("MSFT", 10), &msft)]).unwrap();

        assert_eq!(values.dates(), &[d("2024-01-02"), d("2024-01-04")]);
        assert_relative_eq!(values.values()[0], 700.0);
        assert_relative_eq!(values.values()[1], 760.0);
        assert_eq!(values.latest(), Some((d("2024-01-04"), 760.0)));
    }

    #[test]
    fn test_zero_shares_contribute_nothing() {
        let a = series("A", &[("2024-01-02", 10.0), ("2024-01-03", 20.0)]);
        let b = series("B", &[("2024-01-02", 5.0), ("2024-01-03", 5.0)]);
        let values = portfolio_values(&[(holding("A", 0), &a), (holding("B", 3), &b)]).unwrap();
        assert_eq!(values.values(), &[15.0, 15.0]);
    }

    #[test]
    fn test_mismatched_symbol_rejected() {
        let a = series("A", &[("2024-01-02", 10.0)]);
        let result = portfolio_values(&[(holding("B", 1), &a)]);
        assert!(matches!(result, Err(RiskError::InvalidInput(_))));
    }

    #[test]
    fn test_no_positions_rejected() {
        assert!(matches!(
            portfolio_values(&[]),
            Err(RiskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_log_returns_and_losses() {
        let values = PortfolioValueSeries::new(
            vec![d("2024-01-02"), d("2024-01-03"), d("2024-01-04")],
            vec![100.0, 110.0, 99.0],
        )
        .unwrap();

        let returns = log_returns(&values).unwrap();
        assert_eq!(returns.len(), 2);
        assert_eq!(returns.dates(), &[d("2024-01-03"), d("2024-01-04")]);
        assert_relative_eq!(returns.values()[0], (1.1_f64).ln(), epsilon = 1e-12);
        assert_relative_eq!(returns.values()[1], (0.9_f64).ln(), epsilon = 1e-12);

        let losses = returns.losses();
        assert_relative_eq!(losses.values()[1], -(0.9_f64).ln(), epsilon = 1e-12);
        assert_eq!(losses.worst().unwrap().0, d("2024-01-04"));
    }

    #[test]
    fn test_insufficient_values() {
        let values = PortfolioValueSeries::new(vec![d("2024-01-02")], vec![100.0]).unwrap();
        assert_eq!(
            log_returns(&values),
            Err(RiskError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_non_positive_value_reports_date() {
        for bad in [0.0, -5.0] {
            let values = PortfolioValueSeries::new(
                vec![d("2024-01-02"), d("2024-01-03"), d("2024-01-04")],
                vec![100.0, bad, 90.0],
            )
            .unwrap();
            assert_eq!(
                log_returns(&values),
                Err(RiskError::NonPositiveValue {
                    date: d("2024-01-03"),
                    value: bad
                })
            );
        }
    }

    #[test]
    fn test_value_series_validation() {
        assert!(PortfolioValueSeries::new(vec![d("2024-01-02")], vec![]).is_err());
        assert!(PortfolioValueSeries::new(
            vec![d("2024-01-03"), d("2024-01-02")],
            vec![1.0, 2.0]
        )
        .is_err());
    }

    #[test]
    fn test_portfolio_losses_end_to_end() {
        let a = series("A", &[("2024-01-02", 10.0), ("2024-01-03", 8.0)]);
        let losses = portfolio_losses(&[(holding("A", 5), &a)]).unwrap();
        assert_eq!(losses.len(), 1);
        assert_relative_eq!(losses.values()[0], (10.0_f64 / 8.0).ln(), epsilon = 1e-12);
    }
}

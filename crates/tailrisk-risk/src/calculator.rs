//! Historical risk calculator over several confidence levels.
//!
//! `HistoricalRiskCalculator` owns one loss series and produces a
//! [`RiskReport`]: a VaR/ES estimate per configured confidence level, the
//! matching currency amounts when a reference value is set, and summary
//! statistics of the losses.
//!
//! # Example
//!
//! ```rust
//! use tailrisk_risk::calculator::HistoricalRiskCalculator;
//!
//! let losses = vec![-0.01, 0.02, -0.03, 0.01, -0.05, 0.04, -0.02, 0.03, -0.04, 0.05];
//!
//! let calc = HistoricalRiskCalculator::new(losses)
//!     .unwrap()
//!     .with_confidence_levels(vec![0.9, 0.95])
//!     .with_reference_value(250_000.0);
//!
//! let report = calc.report().unwrap();
//! assert_eq!(report.levels.len(), 2);
//! assert!(report.levels[0].estimate.is_ok());
//! ```

use rayon::prelude::*;
use rust_decimal::prelude::*;
use serde::Serialize;

use tailrisk_math::statistics::{mean, sample_std_dev};

use crate::returns::LossSeries;
use crate::var::{estimate_risk, CurrencyRisk, RiskEstimate};
use crate::{RiskError, RiskResult};

/// Confidence levels reported when none are configured.
pub const STANDARD_CONFIDENCE_LEVELS: [f64; 2] = [0.95, 0.99];

/// Descriptive statistics of a loss series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossSummary {
    /// Number of losses.
    pub observations: usize,
    /// Mean daily loss.
    pub mean: f64,
    /// Sample standard deviation (absent for a single observation).
    pub std_dev: Option<f64>,
    /// Largest single loss.
    pub worst: f64,
}

/// Result for one confidence level.
///
/// A failed estimate is kept with its error so that a report can show the
/// reason next to the level instead of a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRisk {
    /// Confidence level.
    pub alpha: f64,
    /// VaR/ES in loss units, or the reason it could not be computed.
    #[serde(serialize_with = "serialize_outcome")]
    pub estimate: RiskResult<RiskEstimate>,
    /// Currency amounts, when a reference value was set and the estimate
    /// succeeded.
    pub currency: Option<CurrencyRisk>,
}

/// Full output of [`HistoricalRiskCalculator::report`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    /// Loss series statistics.
    pub summary: LossSummary,
    /// Reference portfolio value for currency amounts.
    pub reference_value: Option<Decimal>,
    /// One entry per configured confidence level, in configured order.
    pub levels: Vec<LevelRisk>,
}

/// Calculator for historical VaR/ES.
///
/// Each confidence level is estimated independently from the same
/// immutable loss series.
#[derive(Debug, Clone)]
pub struct HistoricalRiskCalculator {
    /// Losses in the order they occurred.
    losses: Vec<f64>,
    /// Confidence levels to report.
    confidence_levels: Vec<f64>,
    /// Portfolio value for currency scaling.
    reference_value: Option<f64>,
}

impl HistoricalRiskCalculator {
    /// Creates a calculator with the standard 95% / 99% levels.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InsufficientData` if `losses` is empty.
    pub fn new(losses: Vec<f64>) -> RiskResult<Self> {
        if losses.is_empty() {
            return Err(RiskError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        Ok(Self {
            losses,
            confidence_levels: STANDARD_CONFIDENCE_LEVELS.to_vec(),
            reference_value: None,
        })
    }

    /// Creates a calculator from a dated loss series.
    pub fn from_loss_series(losses: &LossSeries) -> RiskResult<Self> {
        Self::new(losses.values().to_vec())
    }

    /// Sets the confidence levels to report.
    #[must_use]
    pub fn with_confidence_levels(mut self, levels: Vec<f64>) -> Self {
        self.confidence_levels = levels;
        self
    }

    /// Sets the reference portfolio value for currency amounts.
    #[must_use]
    pub fn with_reference_value(mut self, value: f64) -> Self {
        self.reference_value = Some(value);
        self
    }

    /// Estimates VaR/ES at a single level.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidConfidenceLevel` if `alpha` is not in
    /// (0, 1) and `RiskError::InvalidInput` if a loss is not finite.
    pub fn estimate(&self, alpha: f64) -> RiskResult<RiskEstimate> {
        estimate_risk(&self.losses, alpha)
    }

    /// Estimates every configured level, failing if any level fails.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing level; with several failures, which
    /// one is unspecified.
    pub fn estimate_all(&self) -> RiskResult<Vec<RiskEstimate>> {
        self.confidence_levels
            .par_iter()
            .map(|&alpha| self.estimate(alpha))
            .collect()
    }

    /// Estimates every configured level, keeping per-level failures.
    pub fn estimate_each(&self) -> Vec<(f64, RiskResult<RiskEstimate>)> {
        self.confidence_levels
            .par_iter()
            .map(|&alpha| (alpha, self.estimate(alpha)))
            .collect()
    }

    /// Descriptive statistics of the losses.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InsufficientData` if there are no losses, which
    /// [`HistoricalRiskCalculator::new`] already rules out.
    pub fn summary(&self) -> RiskResult<LossSummary> {
        let worst = self
            .losses
            .iter()
            .copied()
            .max_by(f64::total_cmp)
            .ok_or(RiskError::InsufficientData {
                required: 1,
                actual: 0,
            })?;

        Ok(LossSummary {
            observations: self.losses.len(),
            mean: mean(&self.losses)?,
            std_dev: sample_std_dev(&self.losses).ok(),
            worst,
        })
    }

    /// Builds the full report.
    ///
    /// # Errors
    ///
    /// Fails only on problems with the series or the reference value;
    /// per-level failures are recorded in [`LevelRisk::estimate`].
    pub fn report(&self) -> RiskResult<RiskReport> {
        let summary = self.summary()?;

        let levels = self
            .estimate_each()
            .into_iter()
            .map(|(alpha, estimate)| -> RiskResult<LevelRisk> {
                let currency = match (&estimate, self.reference_value) {
                    (Ok(e), Some(value)) => Some(e.in_currency(value)?),
                    _ => None,
                };
                match &estimate {
                    Ok(e) => log::debug!("{e}"),
                    Err(err) => log::warn!("confidence level {alpha}: {err}"),
                }
                Ok(LevelRisk {
                    alpha,
                    estimate,
                    currency,
                })
            })
            .collect::<RiskResult<Vec<_>>>()?;

        let reference_value = self
            .reference_value
            .and_then(Decimal::from_f64_retain)
            .map(|d| d.round_dp(2));

        Ok(RiskReport {
            summary,
            reference_value,
            levels,
        })
    }

    /// Returns the losses.
    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    /// Returns the configured confidence levels.
    pub fn confidence_levels(&self) -> &[f64] {
        &self.confidence_levels
    }

    /// Returns the reference value, if set.
    pub fn reference_value(&self) -> Option<f64> {
        self.reference_value
    }
}

fn serialize_outcome<S>(outcome: &RiskResult<RiskEstimate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    #[derive(Serialize)]
    #[serde(rename_all = "snake_case")]
    enum Outcome<'a> {
        Ok(&'a RiskEstimate),
        Error(String),
    }

    match outcome {
        Ok(estimate) => Outcome::Ok(estimate).serialize(serializer),
        Err(err) => Outcome::Error(err.to_string()).serialize(serializer),
    }
}

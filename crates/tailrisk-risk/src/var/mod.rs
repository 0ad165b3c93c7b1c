//! Value at Risk (VaR) and Expected Shortfall (ES).
//!
//! Both are loss quantities over a one-day horizon, in the units of the
//! loss series (log returns). [`RiskEstimate::in_currency`] scales them by a
//! reference portfolio value.

mod historical;

pub use historical::*;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{RiskError, RiskResult};

/// Historical VaR/ES at one confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEstimate {
    /// Confidence level (e.g., 0.95 for 95%)
    pub alpha: f64,
    /// The alpha-quantile of the losses.
    pub var: f64,
    /// Mean of the losses at or beyond `var`.
    pub es: f64,
    /// Number of losses averaged into `es`.
    pub tail_count: usize,
    /// Number of losses the estimate was drawn from.
    pub observations: usize,
}

impl RiskEstimate {
    /// Expected tail size `(1 - alpha) * N` for comparison with `tail_count`.
    #[must_use]
    pub fn expected_tail_count(&self) -> f64 {
        (1.0 - self.alpha) * self.observations as f64
    }

    /// Scales VaR and ES into currency at `reference_value`.
    ///
    /// Amounts are rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidInput` if the reference value is not a
    /// finite positive number.
    pub fn in_currency(&self, reference_value: f64) -> RiskResult<CurrencyRisk> {
        if !(reference_value.is_finite() && reference_value > 0.0) {
            return Err(RiskError::InvalidInput(format!(
                "reference value must be positive, got {reference_value}"
            )));
        }

        Ok(CurrencyRisk {
            alpha: self.alpha,
            reference_value: to_cents(reference_value)?,
            var: to_cents(self.var * reference_value)?,
            es: to_cents(self.es * reference_value)?,
        })
    }
}

impl std::fmt::Display for RiskEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VaR({:.0}%): {:.4}%, ES: {:.4}% ({} of {} in tail)",
            self.alpha * 100.0,
            self.var * 100.0,
            self.es * 100.0,
            self.tail_count,
            self.observations
        )
    }
}

/// VaR/ES expressed in currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRisk {
    /// Confidence level (e.g., 0.95 for 95%)
    pub alpha: f64,
    /// Portfolio value the loss fractions were applied to.
    pub reference_value: Decimal,
    /// VaR amount.
    pub var: Decimal,
    /// ES amount.
    pub es: Decimal,
}

impl std::fmt::Display for CurrencyRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VaR({:.0}%): ${:.2}, ES: ${:.2}",
            self.alpha * 100.0,
            self.var,
            self.es
        )
    }
}

fn to_cents(amount: f64) -> RiskResult<Decimal> {
    Decimal::from_f64_retain(amount)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| RiskError::InvalidInput(format!("amount {amount} out of decimal range")))
}

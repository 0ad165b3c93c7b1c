//! Historical VaR and Expected Shortfall.

use tailrisk_math::statistics::{quantile_sorted, sorted_copy};

use super::RiskEstimate;
use crate::{RiskError, RiskResult};

/// Estimate historical VaR and ES from a series of losses.
///
/// VaR is the linear-interpolation `alpha`-quantile of the losses: with the
/// losses sorted ascending `s[0..n]` and rank `h = alpha * (n - 1)`,
/// `VaR = s[floor(h)] + (h - floor(h)) * (s[ceil(h)] - s[floor(h)])`.
///
/// ES is the mean of every loss `>= VaR`; ties at the threshold are all in
/// the tail.
///
/// # Arguments
///
/// * `losses` - Losses (negated returns, positive = the portfolio fell)
/// * `alpha` - Confidence level, strictly between 0 and 1
///
/// # Errors
///
/// - `RiskError::InsufficientData` if `losses` is empty
/// - `RiskError::InvalidConfidenceLevel` if `alpha` is not in (0, 1)
/// - `RiskError::EmptyTail` if no loss reaches VaR; the quantile is
///   clamped to the upper order statistic, so this is not produced for
///   finite input and guards the tail average against a future quantile
///   change
/// - `RiskError::InvalidInput` if a loss is NaN or infinite
pub fn estimate_risk(losses: &[f64], alpha: f64) -> RiskResult<RiskEstimate> {
    if losses.is_empty() {
        return Err(RiskError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(RiskError::InvalidConfidenceLevel { alpha });
    }

    let sorted = sorted_copy(losses)?;
    let var = quantile_sorted(&sorted, alpha)?;

    let tail = &sorted[sorted.partition_point(|&x| x < var)..];
    if tail.is_empty() {
        return Err(RiskError::EmptyTail { alpha, var });
    }

    // Averaging excesses over the threshold keeps ES >= VaR under rounding.
    let excess: f64 = tail.iter().map(|x| x - var).sum();
    let es = var + excess / tail.len() as f64;

    Ok(RiskEstimate {
        alpha,
        var,
        es,
        tail_count: tail.len(),
        observations: losses.len(),
    })
}

/// Estimate historical VaR and ES from returns (losses are `-returns`).
///
/// # Errors
///
/// Same as [`estimate_risk`].
pub fn estimate_risk_from_returns(returns: &[f64], alpha: f64) -> RiskResult<RiskEstimate> {
    let losses: Vec<f64> = returns.iter().map(|r| -r).collect();
    estimate_risk(&losses, alpha)
}

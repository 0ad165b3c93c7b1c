//! # tailrisk-risk
//!
//! Historical-method tail risk for a fixed-share equity portfolio.
//!
//! - **Returns**: portfolio value series from aligned prices, daily log
//!   returns, loss series
//! - **VaR / ES**: empirical Value-at-Risk (linear-interpolation quantile)
//!   and Expected Shortfall (mean of losses at or beyond VaR)
//! - **Calculator**: several confidence levels over one loss series, with
//!   optional currency scaling
//!
//! ## Example
//!
//! ```rust
//! use tailrisk_risk::prelude::*;
//!
//! let losses = [-0.01, 0.02, -0.03, 0.01, -0.05, 0.04, -0.02, 0.03, -0.04, 0.05];
//! let estimate = estimate_risk(&losses, 0.9).unwrap();
//!
//! assert!((estimate.var - 0.041).abs() < 1e-12);
//! assert!((estimate.es - 0.05).abs() < 1e-12);
//! assert_eq!(estimate.tail_count, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod calculator;
mod error;
pub mod returns;
pub mod var;

pub use error::{RiskError, RiskResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::{
        HistoricalRiskCalculator, LevelRisk, LossSummary, RiskReport, STANDARD_CONFIDENCE_LEVELS,
    };
    pub use crate::returns::{
        log_returns, portfolio_losses, portfolio_values, LossSeries, PortfolioValueSeries,
        ReturnSeries,
    };
    pub use crate::var::{estimate_risk, CurrencyRisk, RiskEstimate};
    pub use crate::{RiskError, RiskResult};
}

//! # Tailrisk Math
//!
//! Statistical utilities for the Tailrisk historical risk library.
//!
//! This crate provides:
//!
//! - **Quantiles**: Empirical quantiles with linear interpolation between
//!   order statistics
//! - **Moments**: Mean and sample standard deviation
//!
//! ## Design Philosophy
//!
//! - **Reproducible**: One pinned interpolation convention, total ordering
//!   of floats
//! - **Non-destructive**: Inputs are borrowed; sorting happens on copies

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::statistics::{mean, quantile, quantile_sorted, sample_std_dev, sorted_copy};
}

pub use error::{MathError, MathResult};

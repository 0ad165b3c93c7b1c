//! Descriptive statistics over `f64` samples.

mod moments;
mod quantile;

pub use moments::{mean, sample_std_dev};
pub use quantile::{quantile, quantile_sorted, sorted_copy};

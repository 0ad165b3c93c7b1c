//! Empirical quantiles.
//!
//! Uses the "linear" convention (Hyndman & Fan type 7): for a sample sorted
//! ascending `s[0..n]` and probability `p`, the rank is `h = p * (n - 1)` and
//!
//! ```text
//! Q(p) = s[floor(h)] + (h - floor(h)) * (s[ceil(h)] - s[floor(h)])
//! ```
//!
//! Nearest-rank and other conventions give different answers on the same
//! data, so this is the only one offered.

use crate::error::{MathError, MathResult};

/// Returns an ascending copy of `data` under `f64::total_cmp`.
///
/// # Errors
///
/// Returns `MathError::InvalidInput` if any value is NaN or infinite.
pub fn sorted_copy(data: &[f64]) -> MathResult<Vec<f64>> {
    if let Some(pos) = data.iter().position(|x| !x.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "non-finite value {} at index {pos}",
            data[pos]
        )));
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Linear-interpolation quantile of an already sorted sample.
///
/// # Arguments
///
/// * `sorted` - Sample sorted ascending
/// * `p` - Probability in `[0, 1]`
///
/// # Example
///
/// ```rust
/// use tailrisk_math::statistics::quantile_sorted;
///
/// let q = quantile_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.9).unwrap();
/// assert!((q - 4.6).abs() < 1e-12);
/// ```
pub fn quantile_sorted(sorted: &[f64], p: f64) -> MathResult<f64> {
    if sorted.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::InvalidProbability { p });
    }

    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(sorted.len() - 1);

    if lo == hi {
        return Ok(sorted[lo]);
    }

    let weight = rank - lo as f64;
    let interpolated = sorted[lo] + weight * (sorted[hi] - sorted[lo]);
    // Rounding can carry the interpolant just past the upper order statistic.
    Ok(interpolated.min(sorted[hi]))
}

/// Linear-interpolation quantile of an unsorted sample.
///
/// Sorts a copy; `data` is left untouched.
pub fn quantile(data: &[f64], p: f64) -> MathResult<f64> {
    let sorted = sorted_copy(data)?;
    quantile_sorted(&sorted, p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interpolates_between_order_statistics() {
        let data = [0.05, -0.01, 0.03, -0.05, 0.01, 0.04, -0.02, 0.02, -0.04, -0.03];
        // rank 0.9 * 9 = 8.1 -> 0.04 + 0.1 * (0.05 - 0.04)
        assert_relative_eq!(quantile(&data, 0.9).unwrap(), 0.041, epsilon = 1e-12);
    }

    #[test]
    fn test_endpoints() {
        let data = [3.0, 1.0, 2.0];
        assert_relative_eq!(quantile(&data, 0.0).unwrap(), 1.0);
        assert_relative_eq!(quantile(&data, 1.0).unwrap(), 3.0);
        assert_relative_eq!(quantile(&data, 0.5).unwrap(), 2.0);
    }

    #[test]
    fn test_single_value() {
        assert_relative_eq!(quantile(&[0.7], 0.99).unwrap(), 0.7);
    }

    #[test]
    fn test_input_not_mutated() {
        let data = vec![0.3, -0.1, 0.2];
        let before = data.clone();
        let _ = quantile(&data, 0.5).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            quantile(&[], 0.5),
            Err(MathError::InsufficientData {
                required: 1,
                actual: 0
            })
        );
        assert!(matches!(
            quantile(&[1.0], 1.5),
            Err(MathError::InvalidProbability { .. })
        ));
        assert!(matches!(
            quantile(&[1.0, f64::NAN], 0.5),
            Err(MathError::InvalidInput { .. })
        ));
    }
}

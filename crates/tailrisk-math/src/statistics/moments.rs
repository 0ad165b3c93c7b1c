//! Sample moments.

use crate::error::{MathError, MathResult};

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> MathResult<f64> {
    if data.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation with denominator `n - 1`.
pub fn sample_std_dev(data: &[f64]) -> MathResult<f64> {
    if data.len() < 2 {
        return Err(MathError::insufficient_data(2, data.len()));
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    Ok((ss / (data.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_sample_std_dev() {
        // var = ((1.5^2 + 0.5^2) * 2) / 3 = 5/3
        let sd = sample_std_dev(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(sd, (5.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert!(sample_std_dev(&[1.0]).is_err());
    }
}

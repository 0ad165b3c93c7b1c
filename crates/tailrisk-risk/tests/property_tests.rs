//! Property-based tests for historical VaR/ES invariants.
//!
//! These tests verify properties that must hold for any loss series:
//! - VaR and ES are non-decreasing in the confidence level
//! - VaR <= ES
//! - 1 <= tail_count <= N
//! - Repeated calls are bit-identical and leave the input untouched

use proptest::prelude::*;
use tailrisk_risk::prelude::*;

/// Tolerance for comparisons between means over different tail sets.
const TOLERANCE: f64 = 1e-12;

fn loss_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.2f64..0.2, 1..300)
}

/// Loss series drawn from a handful of values so ties are frequent.
fn tied_loss_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(prop::sample::select(vec![-0.02, -0.01, 0.0, 0.01, 0.03]), 1..60)
}

fn alpha() -> impl Strategy<Value = f64> {
    0.001f64..0.999
}

proptest! {
    #[test]
    fn var_never_exceeds_es(losses in loss_series(), a in alpha()) {
        let estimate = estimate_risk(&losses, a).unwrap();
        prop_assert!(estimate.var <= estimate.es, "{} > {}", estimate.var, estimate.es);
    }

    #[test]
    fn monotone_in_alpha(losses in loss_series(), a1 in alpha(), a2 in alpha()) {
        let (lo, hi) = if a1 <= a2 { (a1, a2) } else { (a2, a1) };
        let low = estimate_risk(&losses, lo).unwrap();
        let high = estimate_risk(&losses, hi).unwrap();

        prop_assert!(low.var <= high.var + TOLERANCE);
        prop_assert!(low.es <= high.es + TOLERANCE);
    }

    #[test]
    fn tail_count_bounds(losses in loss_series(), a in alpha()) {
        let estimate = estimate_risk(&losses, a).unwrap();
        prop_assert!(estimate.tail_count >= 1);
        prop_assert!(estimate.tail_count <= losses.len());
        prop_assert_eq!(estimate.observations, losses.len());
    }

    #[test]
    fn tail_counts_every_loss_at_or_above_var(losses in tied_loss_series(), a in alpha()) {
        let estimate = estimate_risk(&losses, a).unwrap();
        let expected = losses.iter().filter(|&&x| x >= estimate.var).count();
        prop_assert_eq!(estimate.tail_count, expected);
    }

    #[test]
    fn deterministic_and_non_mutating(losses in loss_series(), a in alpha()) {
        let before = losses.clone();
        let first = estimate_risk(&losses, a).unwrap();
        let second = estimate_risk(&losses, a).unwrap();

        prop_assert_eq!(&losses, &before);
        prop_assert_eq!(first.var.to_bits(), second.var.to_bits());
        prop_assert_eq!(first.es.to_bits(), second.es.to_bits());
        prop_assert_eq!(first.tail_count, second.tail_count);
    }

    #[test]
    fn var_within_sample_range(losses in loss_series(), a in alpha()) {
        let estimate = estimate_risk(&losses, a).unwrap();
        let min = losses.iter().copied().fold(f64::INFINITY, f64::min);
        let max = losses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(estimate.var >= min && estimate.var <= max);
        prop_assert!(estimate.es <= max + TOLERANCE);
    }
}

proptest! {
    #[test]
    fn es_matches_plain_tail_mean(losses in loss_series(), a in alpha()) {
        let estimate = estimate_risk(&losses, a).unwrap();
        let tail: Vec<f64> = losses.iter().copied().filter(|&x| x >= estimate.var).collect();
        let mean = tail.iter().sum::<f64>() / tail.len() as f64;

        prop_assert!(
            (estimate.es - mean).abs() <= TOLERANCE * mean.abs().max(1.0),
            "es {} vs tail mean {}",
            estimate.es,
            mean
        );
    }
}

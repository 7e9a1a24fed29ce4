//! Poisson log-density over bins with real-valued observed counts.
//!
//! `log p(k | lambda) = sum_i k_i ln(lambda_i) - lambda_i - lgamma(k_i + 1)`
//!
//! `lgamma(k + 1)` extends `ln(k!)` to non-integer `k`, so relaxed (Asimov or
//! auxiliary) counts are scored by the same formula.

use hf_ad::Scalar;
use hf_core::check::{ensure_positive, ensure_same_len};
use hf_core::{DomainCheck, Result};

/// Log-probability of a single bin.
#[inline]
pub fn poisson_log_density_bin<T: Scalar>(k: T, lambda: T) -> T {
    k * lambda.ln() - lambda - (k + T::from_f64(1.0)).lgamma()
}

/// Summed Poisson log-probability of observed counts `k` given rates `lambda`.
///
/// Bins are accumulated in order starting from zero.
///
/// # Errors
/// [`hf_core::Error::Shape`] if `k` and `lambda` differ in length; with
/// [`DomainCheck::Checked`], [`hf_core::Error::Domain`] for the first rate
/// that is not strictly positive.
pub fn poisson_log_density<T: Scalar>(k: &[T], lambda: &[T], check: DomainCheck) -> Result<T> {
    ensure_same_len("lambda", k.len(), lambda.len())?;
    if check.is_checked() {
        for (i, rate) in lambda.iter().enumerate() {
            ensure_positive("rate", i, rate.value())?;
        }
    }

    let mut total = T::from_f64(0.0);
    for (&ki, &li) in k.iter().zip(lambda) {
        total = total + poisson_log_density_bin(ki, li);
    }
    Ok(total)
}

/// Checked [`poisson_log_density`] on plain data.
pub fn poisson_log_density_f64(k: &[f64], lambda: &[f64]) -> Result<f64> {
    poisson_log_density(k, lambda, DomainCheck::Checked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hf_ad::{Dual, ReverseTape};
    use hf_core::Error;
    use proptest::prelude::*;
    use statrs::function::gamma::ln_gamma;

    #[test]
    fn test_closed_form_single_bin() {
        let lp = poisson_log_density_f64(&[3.0], &[2.0]).unwrap();
        assert_relative_eq!(lp, 3.0 * 2.0_f64.ln() - 2.0 - ln_gamma(4.0), epsilon = 1e-12);
        assert_relative_eq!(lp, (8.0 * (-2.0_f64).exp() / 6.0).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_count_bin() {
        let lp = poisson_log_density_f64(&[0.0], &[2.5]).unwrap();
        assert_relative_eq!(lp, -2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_non_integer_counts() {
        let lp = poisson_log_density_f64(&[2.5], &[3.0]).unwrap();
        assert_relative_eq!(lp, 2.5 * 3.0_f64.ln() - 3.0 - ln_gamma(3.5), epsilon = 1e-12);
    }

    #[test]
    fn test_decreasing_in_rate_above_count() {
        let k = [4.0];
        let mut prev = poisson_log_density_f64(&k, &[4.0]).unwrap();
        for step in 1..50 {
            let rate = 4.0 + step as f64 * 0.5;
            let lp = poisson_log_density_f64(&k, &[rate]).unwrap();
            assert!(lp < prev, "not decreasing at lambda={rate}");
            prev = lp;
        }
    }

    #[test]
    fn test_sums_bins() {
        let k = [3.0, 0.0, 7.0];
        let lambda = [2.0, 0.5, 6.5];
        let total = poisson_log_density_f64(&k, &lambda).unwrap();
        let by_bin: f64 = k.iter().zip(&lambda).map(|(&a, &b)| poisson_log_density_bin(a, b)).sum();
        assert_relative_eq!(total, by_bin, epsilon = 1e-12);
    }

    #[test]
    fn test_domain_rejection() {
        let err = poisson_log_density_f64(&[1.0], &[0.0]).unwrap_err();
        assert!(matches!(err, Error::Domain { what: "rate", index: 0, .. }));

        let err = poisson_log_density_f64(&[1.0, 2.0], &[1.0, -3.0]).unwrap_err();
        assert!(matches!(err, Error::Domain { index: 1, .. }));
    }

    #[test]
    fn test_unchecked_propagates() {
        let lp = poisson_log_density(&[1.0], &[0.0], DomainCheck::Unchecked).unwrap();
        assert_eq!(lp, f64::NEG_INFINITY);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = poisson_log_density_f64(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::Shape { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_dual_rate_gradient() {
        // d/dlam = k/lam - 1
        let k = [Dual::constant(10.0)];
        let lambda = [Dual::var(12.0)];
        let lp = poisson_log_density(&k, &lambda, DomainCheck::Checked).unwrap();
        assert_relative_eq!(lp.dot, 10.0 / 12.0 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reverse_gradient_all_rates() {
        let k = [3.0, 5.0, 0.0];
        let rates = [2.0, 6.0, 1.5];

        let tape = ReverseTape::new();
        let lambda: Vec<_> = rates.iter().map(|&r| tape.var(r)).collect();
        let k_s = hf_ad::Reverse::lift_slice(&k);
        let lp = poisson_log_density(&k_s, &lambda, DomainCheck::Checked).unwrap();
        tape.backward(lp);

        for i in 0..3 {
            assert_relative_eq!(tape.adjoint(lambda[i]), k[i] / rates[i] - 1.0, epsilon = 1e-12);
        }
    }

    proptest! {
        #[test]
        fn prop_integer_counts_match_pmf(k in 0u32..60, lambda in 1e-3f64..1e3) {
            let kf = k as f64;
            let lp = poisson_log_density_f64(&[kf], &[lambda]).unwrap();
            let ln_k_fact: f64 = (1..=k).map(|j| (j as f64).ln()).sum();
            let reference = kf * lambda.ln() - lambda - ln_k_fact;
            prop_assert!((lp - reference).abs() <= 1e-9 * (1.0 + reference.abs()));
        }
    }
}

//! Gaussian constraint densities.
//!
//! Interpolated systematics are paired with a standard-normal constraint on
//! their nuisance parameter, and per-bin statistical-error factors with a
//! Normal centred at 1. Both are summed into the same likelihood as the
//! Poisson main term.

use hf_ad::Scalar;
use hf_core::check::ensure_same_len;
use hf_core::{Error, Result};

/// Natural log of `sqrt(2π)`.
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Log-PDF of `N(mu, sigma)` at `x`.
///
/// `log p(x) = -0.5 * ((x-mu)/sigma)^2 - ln(sigma) - ln(sqrt(2π))`
#[inline]
pub fn normal_log_density_bin<T: Scalar>(x: T, mu: T, sigma: T) -> T {
    let z = (x - mu) / sigma;
    T::from_f64(-0.5) * z * z - sigma.ln() - T::from_f64(LN_SQRT_2PI)
}

/// Summed standard-normal log-density of nuisance parameters `alpha`.
pub fn std_normal_log_density<T: Scalar>(alpha: &[T]) -> T {
    let mut total = T::from_f64(0.0);
    for &a in alpha {
        total = total + T::from_f64(-0.5) * a * a - T::from_f64(LN_SQRT_2PI);
    }
    total
}

/// Summed log-density of `x_i ~ N(mu, sigma_i)` over bins.
///
/// # Errors
/// [`Error::Shape`] if `x` and `sigma` differ in length;
/// [`Error::Validation`] if any `sigma_i` is not finite and > 0.
pub fn normal_log_density<T: Scalar>(x: &[T], mu: T, sigma: &[T]) -> Result<T> {
    ensure_same_len("sigma", x.len(), sigma.len())?;
    for (i, s) in sigma.iter().enumerate() {
        let s = s.value();
        if !s.is_finite() || s <= 0.0 {
            return Err(Error::Validation(format!(
                "sigma must be finite and > 0, got {s} at bin {i}"
            )));
        }
    }

    let mut total = T::from_f64(0.0);
    for (&xi, &si) in x.iter().zip(sigma) {
        total = total + normal_log_density_bin(xi, mu, si);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hf_ad::Dual;

    #[test]
    fn test_standard_at_zero() {
        assert_relative_eq!(std_normal_log_density(&[0.0]), -LN_SQRT_2PI, epsilon = 1e-12);
        assert_relative_eq!(
            normal_log_density_bin(0.0, 0.0, 1.0),
            -LN_SQRT_2PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_std_normal_matches_general() {
        let alpha = [0.3, -1.2, 2.0];
        let ones = [1.0; 3];
        let general = normal_log_density(&alpha, 0.0, &ones).unwrap();
        assert_relative_eq!(std_normal_log_density(&alpha), general, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetry_about_mu() {
        let lp1 = normal_log_density(&[1.3], 1.0, &[0.2]).unwrap();
        let lp2 = normal_log_density(&[0.7], 1.0, &[0.2]).unwrap();
        assert_relative_eq!(lp1, lp2, epsilon = 1e-12);
    }

    #[test]
    fn test_constraint_pull_gradient() {
        // d/dalpha [-alpha^2 / 2] = -alpha
        let lp = std_normal_log_density(&[Dual::var(0.8)]);
        assert_relative_eq!(lp.dot, -0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_sigma() {
        assert!(matches!(normal_log_density(&[1.0], 1.0, &[0.0]), Err(Error::Validation(_))));
        assert!(normal_log_density(&[1.0], 1.0, &[-1.0]).is_err());
        assert!(normal_log_density(&[1.0], 1.0, &[f64::NAN]).is_err());
        assert!(matches!(normal_log_density(&[1.0, 1.1], 1.0, &[0.1]), Err(Error::Shape { .. })));
    }
}

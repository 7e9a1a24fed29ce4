//! Multiplicative interpolation (`normsys`-style scale factors).
//!
//! With down/up factors `l`/`u` (the scale at `alpha = -1`/`+1`):
//!
//! - `alpha > 1`:  `u^alpha`
//! - `alpha < -1`: `l^(-alpha)`
//! - otherwise:    `1 + r^T M b`, with `r = [alpha, ..., alpha^6]` and
//!   `b = [u - 1, l - 1, u ln u, -l ln l, u ln^2 u, l ln^2 l]`.
//!
//! [`SMOOTHING_MATRIX`] (`M`) is fixed so that the polynomial reproduces the
//! value, slope and curvature of both exponential pieces at `alpha = ±1`.
//! The polynomial has no constant term, so the factor is exactly 1 at
//! `alpha = 0`.

use hf_ad::Scalar;
use hf_core::check::{ensure_positive, ensure_same_len};
use hf_core::{DomainCheck, Result, VariationPair};

use crate::regime::Regime;

/// Maps the boundary basis `b` to the coefficients of `alpha^1 ..= alpha^6`.
///
/// Row `k` holds the weights of the `alpha^(k+1)` coefficient.
pub const SMOOTHING_MATRIX: [[f64; 6]; 6] = [
    [15.0 / 16.0, -15.0 / 16.0, -7.0 / 16.0, -7.0 / 16.0, 1.0 / 16.0, -1.0 / 16.0],
    [3.0 / 2.0, 3.0 / 2.0, -9.0 / 16.0, 9.0 / 16.0, 1.0 / 16.0, 1.0 / 16.0],
    [-5.0 / 8.0, 5.0 / 8.0, 5.0 / 8.0, 5.0 / 8.0, -1.0 / 8.0, 1.0 / 8.0],
    [-3.0 / 2.0, -3.0 / 2.0, 7.0 / 8.0, -7.0 / 8.0, -1.0 / 8.0, -1.0 / 8.0],
    [3.0 / 16.0, -3.0 / 16.0, -3.0 / 16.0, -3.0 / 16.0, 1.0 / 16.0, -1.0 / 16.0],
    [1.0 / 2.0, 1.0 / 2.0, -5.0 / 16.0, 5.0 / 16.0, 1.0 / 16.0, 1.0 / 16.0],
];

/// `[alpha, alpha^2, ..., alpha^6]` by repeated multiplication.
#[inline]
fn alpha_powers<T: Scalar>(alpha: T) -> [T; 6] {
    let mut r = [alpha; 6];
    for i in 1..6 {
        r[i] = r[i - 1] * alpha;
    }
    r
}

#[inline]
fn interior<T: Scalar>(r: &[T; 6], l: T, u: T) -> T {
    let one = T::from_f64(1.0);
    let log_u = u.ln();
    let log_l = l.ln();
    let b = [
        u - one,
        l - one,
        log_u * u,
        -(log_l * l),
        log_u * log_u * u,
        log_l * log_l * l,
    ];

    let mut out = one;
    for (row, &rk) in SMOOTHING_MATRIX.iter().zip(r) {
        let mut coeff = T::from_f64(row[0]) * b[0];
        for c in 1..6 {
            coeff = coeff + T::from_f64(row[c]) * b[c];
        }
        out = out + rk * coeff;
    }
    out
}

#[inline]
fn factor_in<T: Scalar>(regime: Regime, alpha: T, r: &[T; 6], l: T, u: T) -> T {
    match regime {
        Regime::ExtrapolateUp => u.pow(alpha),
        Regime::ExtrapolateDown => l.pow(-alpha),
        Regime::Interior => interior(r, l, u),
    }
}

/// Scale factor for down/up factors `lu` at `alpha`.
///
/// # Errors
/// With [`DomainCheck::Checked`], [`hf_core::Error::Domain`] if either factor
/// is not strictly positive. Unchecked evaluation returns NaN/inf instead.
pub fn factor_interp<T: Scalar>(alpha: T, lu: VariationPair<T>, check: DomainCheck) -> Result<T> {
    if check.is_checked() {
        ensure_positive("down factor", 0, lu.down.value())?;
        ensure_positive("up factor", 0, lu.up.value())?;
    }
    Ok(factor_in(Regime::of(alpha.value()), alpha, &alpha_powers(alpha), lu.down, lu.up))
}

/// Per-bin scale factors for bin-wise down/up factors.
///
/// The regime and the powers of `alpha` are evaluated once per call; each
/// entry equals [`factor_interp`] on that bin.
///
/// # Errors
/// [`hf_core::Error::Shape`] if `lu.down` and `lu.up` differ in length;
/// with [`DomainCheck::Checked`], [`hf_core::Error::Domain`] for the first
/// non-positive factor.
pub fn factor_interp_bins<T: Scalar>(
    alpha: T,
    lu: VariationPair<&[T]>,
    check: DomainCheck,
) -> Result<Vec<T>> {
    ensure_same_len("up factors", lu.down.len(), lu.up.len())?;
    if check.is_checked() {
        for (i, (l, u)) in lu.down.iter().zip(lu.up).enumerate() {
            ensure_positive("down factor", i, l.value())?;
            ensure_positive("up factor", i, u.value())?;
        }
    }

    let regime = Regime::of(alpha.value());
    let r = alpha_powers(alpha);
    Ok(lu.down.iter().zip(lu.up).map(|(&l, &u)| factor_in(regime, alpha, &r, l, u)).collect())
}

//! Additive interpolation (`histosys`-style shape shifts).
//!
//! For nominal `x` and down/up templates `l`/`u` the shift is
//!
//! - `alpha > 1`:  `alpha * (u - x)`
//! - `alpha < -1`: `alpha * (x - l)`
//! - otherwise:    `r(alpha) * a + alpha * s` with
//!   `s = (u - l) / 2`, `a = (u + l - 2x) / 16`,
//!   `r(alpha) = alpha^2 * (alpha^2 * (3 alpha^2 - 10) + 15)`.
//!
//! `r(±1) = 8` and `r'(±1) = ±8`, so the polynomial meets both linear pieces
//! with equal value and slope. The result is the shift only; hosts add it to
//! the nominal.

use hf_ad::Scalar;
use hf_core::check::ensure_same_len;
use hf_core::{Result, VariationPair};

use crate::regime::Regime;

/// Even sextic weight of the asymmetric part, `r(alpha)`.
#[inline]
fn asymmetry_weight<T: Scalar>(alpha: T) -> T {
    let alpha_squared = alpha * alpha;
    alpha_squared
        * (alpha_squared * (alpha_squared * T::from_f64(3.0) - T::from_f64(10.0))
            + T::from_f64(15.0))
}

#[inline]
fn interior<T: Scalar>(alpha: T, r: T, x: T, l: T, u: T) -> T {
    let s = T::from_f64(0.5) * (u - l);
    let a = T::from_f64(0.0625) * (u + l - T::from_f64(2.0) * x);
    r * a + alpha * s
}

/// Additive shift of a single bin.
#[inline]
pub fn term_interp_bin<T: Scalar>(alpha: T, x: T, l: T, u: T) -> T {
    match Regime::of(alpha.value()) {
        Regime::ExtrapolateUp => alpha * (u - x),
        Regime::ExtrapolateDown => alpha * (x - l),
        Regime::Interior => interior(alpha, asymmetry_weight(alpha), x, l, u),
    }
}

/// Additive shift of every bin of `nominal` toward `lu.down`/`lu.up`.
///
/// The regime and the polynomial weight are evaluated once per call.
/// NaN/inf in the templates propagate into the affected bins.
///
/// # Errors
/// [`hf_core::Error::Shape`] if the templates and the nominal differ in length.
pub fn term_interp<T: Scalar>(alpha: T, nominal: &[T], lu: VariationPair<&[T]>) -> Result<Vec<T>> {
    let n = nominal.len();
    ensure_same_len("down template", n, lu.down.len())?;
    ensure_same_len("up template", n, lu.up.len())?;

    let bins = nominal.iter().zip(lu.down).zip(lu.up);
    let shifted = match Regime::of(alpha.value()) {
        Regime::ExtrapolateUp => bins.map(|((&x, _), &u)| alpha * (u - x)).collect(),
        Regime::ExtrapolateDown => bins.map(|((&x, &l), _)| alpha * (x - l)).collect(),
        Regime::Interior => {
            let r = asymmetry_weight(alpha);
            bins.map(|((&x, &l), &u)| interior(alpha, r, x, l, u)).collect()
        }
    };
    Ok(shifted)
}

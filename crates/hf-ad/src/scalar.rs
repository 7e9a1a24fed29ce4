//! [`Scalar`] trait: abstraction over `f64`, [`Dual`](crate::dual::Dual) and
//! [`Reverse`](crate::reverse::Reverse) that lets interpolation and likelihood
//! kernels be written once, then reused for plain evaluation, forward-mode
//! and reverse-mode gradients.

use crate::dual::Dual;
use statrs::function::gamma::ln_gamma;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A scalar type suitable for likelihood computation.
///
/// Branches in generic code must read [`value`](Scalar::value) so that the
/// selected branch does not depend on whether derivatives are carried.
pub trait Scalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Sum
    + PartialOrd
    + Sized
{
    /// Wrap an `f64` constant (derivative = 0 for AD types).
    fn from_f64(v: f64) -> Self;

    /// Extract the primal (function) value.
    fn value(&self) -> f64;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Power with a scalar exponent: `self^exp`.
    fn pow(self, exp: Self) -> Self;

    /// `ln(Γ(self))`, the continuous extension of `ln((self - 1)!)`.
    fn lgamma(self) -> Self;

    /// Lift plain data into constants of this type.
    fn lift_slice(data: &[f64]) -> Vec<Self> {
        data.iter().map(|&v| Self::from_f64(v)).collect()
    }
}

// --- f64 implementation ---

impl Scalar for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }

    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }

    #[inline]
    fn pow(self, exp: Self) -> Self {
        f64::powf(self, exp)
    }

    #[inline]
    fn lgamma(self) -> Self {
        ln_gamma(self)
    }
}

// --- Dual implementation ---

impl Scalar for Dual {
    #[inline]
    fn from_f64(v: f64) -> Self {
        Dual::constant(v)
    }

    #[inline]
    fn value(&self) -> f64 {
        self.val
    }

    #[inline]
    fn ln(self) -> Self {
        Dual::ln(self)
    }

    #[inline]
    fn pow(self, exp: Self) -> Self {
        Dual::pow(self, exp)
    }

    #[inline]
    fn lgamma(self) -> Self {
        Dual::lgamma(self)
    }
}

//! # hf-interp
//!
//! Piecewise interpolation kernels that morph a binned rate as a function of a
//! nuisance parameter `alpha`:
//!
//! - [`term_interp`]: additive shift toward down/up templates, linear outside
//!   `[-1, 1]`.
//! - [`factor_interp`] / [`factor_interp_bins`]: multiplicative scale factor,
//!   exponential outside `[-1, 1]`.
//!
//! Inside `[-1, 1]` both use a polynomial that joins the outer pieces with
//! matching value and slope, so gradients are continuous in `alpha`. All
//! kernels are generic over [`hf_ad::Scalar`] and differentiate with `f64`,
//! `Dual` or `Reverse` alike.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod additive;
pub mod multiplicative;
pub mod regime;

pub use additive::{term_interp, term_interp_bin};
pub use multiplicative::{SMOOTHING_MATRIX, factor_interp, factor_interp_bins};
pub use regime::Regime;

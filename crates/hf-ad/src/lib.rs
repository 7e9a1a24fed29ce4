//! # hf-ad
//!
//! Automatic differentiation (AD) primitives for the HistFactory kernels.
//!
//! Provides:
//! - **Forward-mode AD** via [`dual::Dual`] numbers (efficient for few parameters)
//! - **Reverse-mode AD** via a computation [`tape::Tape`], and the
//!   operator-overloaded [`reverse::Reverse`] scalar recorded onto it
//! - [`Scalar`] trait for writing generic code over `f64`, `Dual` and `Reverse`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dual;
pub mod reverse;
pub mod scalar;
pub mod tape;

pub use dual::Dual;
pub use reverse::{Reverse, ReverseTape};
pub use scalar::Scalar;

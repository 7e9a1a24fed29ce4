//! Likelihood building blocks for binned HistFactory-style models.
//!
//! - [`poisson`]: Poisson log-density of observed counts given predicted rates
//! - [`normal`]: Gaussian constraint terms for nuisance parameters
//!
//! Everything is generic over [`hf_ad::Scalar`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod normal;
pub mod poisson;

pub use normal::{normal_log_density, normal_log_density_bin, std_normal_log_density};
pub use poisson::{poisson_log_density, poisson_log_density_bin, poisson_log_density_f64};

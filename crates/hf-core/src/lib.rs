//! # hf-core
//!
//! Shared foundations for the HistFactory interpolation and likelihood kernels:
//! error taxonomy, evaluation configuration and bin-vector types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod check;
pub mod config;
pub mod error;
pub mod types;

pub use config::{DomainCheck, KernelConfig};
pub use error::{Error, Result};
pub use types::VariationPair;

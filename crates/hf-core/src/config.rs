//! Evaluation configuration.
//!
//! The only knob is how invalid log domains are treated. It never changes
//! numeric results for valid inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// How kernels treat arguments outside the domain of `ln`.
///
/// - `Checked`: non-positive factors/rates are reported as [`Error::Domain`].
/// - `Unchecked`: plain float semantics; NaN/inf flow into the result. Use this
///   when the kernel sits inside a gradient tape that may evaluate branches it
///   later discards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainCheck {
    /// Fail fast with [`Error::Domain`].
    #[default]
    Checked,
    /// Propagate NaN/inf without raising.
    Unchecked,
}

impl DomainCheck {
    /// Whether domain violations are reported.
    #[inline]
    pub fn is_checked(self) -> bool {
        matches!(self, DomainCheck::Checked)
    }
}

impl fmt::Display for DomainCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainCheck::Checked => f.write_str("checked"),
            DomainCheck::Unchecked => f.write_str("unchecked"),
        }
    }
}

impl FromStr for DomainCheck {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checked" => Ok(DomainCheck::Checked),
            "unchecked" => Ok(DomainCheck::Unchecked),
            other => Err(Error::Validation(format!(
                "unknown domain check '{other}', expected 'checked' or 'unchecked'"
            ))),
        }
    }
}

/// Host-facing kernel configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Domain policy for `ln` arguments.
    pub domain_check: DomainCheck,
}

impl KernelConfig {
    /// Configuration matching the historical float behaviour.
    pub fn unchecked() -> Self {
        Self { domain_check: DomainCheck::Unchecked }
    }

    /// Parse from a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

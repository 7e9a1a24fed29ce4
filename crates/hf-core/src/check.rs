//! Cheap precondition checks shared by the kernels.

use crate::{Error, Result};

/// Require `got == expected` for an operand of a bin-wise kernel.
#[inline]
pub fn ensure_same_len(what: &'static str, expected: usize, got: usize) -> Result<()> {
    if got != expected {
        return Err(Error::Shape { what, expected, got });
    }
    Ok(())
}

/// Require `value > 0` (NaN is rejected as well).
#[inline]
pub fn ensure_positive(what: &'static str, index: usize, value: f64) -> Result<()> {
    if value > 0.0 {
        return Ok(());
    }
    log::debug!("rejecting {what} = {value} at bin {index}: log argument must be > 0");
    Err(Error::Domain { what, index, value })
}

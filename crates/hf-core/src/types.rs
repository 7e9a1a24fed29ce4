//! Shared bin-vector types

use serde::{Deserialize, Serialize};

/// Down/up alternate values of a systematic variation.
///
/// `down` is the histogram (or factor) at `alpha = -1`, `up` the one at
/// `alpha = +1`. `V` is a bin vector (`Vec<T>`, `&[T]`) for shape variations
/// or a single scalar for normalisation factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariationPair<V> {
    /// Value at `alpha = -1`.
    pub down: V,
    /// Value at `alpha = +1`.
    pub up: V,
}

impl<V> VariationPair<V> {
    /// Create a pair from its down and up members.
    pub fn new(down: V, up: V) -> Self {
        Self { down, up }
    }
}

impl<V> From<(V, V)> for VariationPair<V> {
    fn from((down, up): (V, V)) -> Self {
        Self { down, up }
    }
}

impl<T> VariationPair<Vec<T>> {
    /// Borrow both members as slices.
    pub fn as_slices(&self) -> VariationPair<&[T]> {
        VariationPair { down: &self.down, up: &self.up }
    }
}

impl<T: PartialEq> VariationPair<&[T]> {
    /// `true` when both templates equal `nominal` bin for bin, i.e. the
    /// additive variation shifts nothing for any `alpha`.
    pub fn is_null_additive(&self, nominal: &[T]) -> bool {
        self.down == nominal && self.up == nominal
    }
}

impl VariationPair<f64> {
    /// `true` when both factors are exactly 1, i.e. the multiplicative
    /// variation scales nothing for any `alpha`.
    pub fn is_null_multiplicative(&self) -> bool {
        self.down == 1.0 && self.up == 1.0
    }
}

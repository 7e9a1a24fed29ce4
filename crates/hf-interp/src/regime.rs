//! Piecewise regime selection shared by both interpolators.

/// Which piece of an interpolator applies at a given `alpha`.
///
/// `alpha = ±1` belongs to [`Regime::Interior`]; both pieces agree there.
/// A NaN `alpha` also lands in the interior and propagates through the
/// polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// `alpha < -1`: extrapolate past the down variation.
    ExtrapolateDown,
    /// `-1 <= alpha <= 1`: smooth polynomial.
    Interior,
    /// `alpha > 1`: extrapolate past the up variation.
    ExtrapolateUp,
}

impl Regime {
    /// Classify a primal `alpha` value.
    #[inline]
    pub fn of(alpha: f64) -> Self {
        if alpha > 1.0 {
            Regime::ExtrapolateUp
        } else if alpha < -1.0 {
            Regime::ExtrapolateDown
        } else {
            Regime::Interior
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_interior() {
        assert_eq!(Regime::of(1.0), Regime::Interior);
        assert_eq!(Regime::of(-1.0), Regime::Interior);
        assert_eq!(Regime::of(0.0), Regime::Interior);
    }

    #[test]
    fn test_outside() {
        assert_eq!(Regime::of(1.0 + f64::EPSILON), Regime::ExtrapolateUp);
        assert_eq!(Regime::of(-1.000_001), Regime::ExtrapolateDown);
        assert_eq!(Regime::of(f64::INFINITY), Regime::ExtrapolateUp);
        assert_eq!(Regime::of(f64::NEG_INFINITY), Regime::ExtrapolateDown);
    }

    #[test]
    fn test_nan_is_interior() {
        assert_eq!(Regime::of(f64::NAN), Regime::Interior);
    }
}

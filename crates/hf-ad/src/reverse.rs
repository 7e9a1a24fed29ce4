//! Operator-overloaded reverse-mode scalar.
//!
//! [`Reverse`] records every operation onto a shared [`ReverseTape`], so code
//! written against [`Scalar`] produces a full gradient with a single backward
//! sweep. Constants made by [`Scalar::from_f64`] stay off the tape until they
//! meet a recorded value.
//!
//! ```
//! use hf_ad::reverse::ReverseTape;
//! use hf_ad::scalar::Scalar;
//!
//! let tape = ReverseTape::new();
//! let x = tape.var(3.0);
//! let y = tape.var(5.0);
//! let f = x * y + x.ln();
//! tape.backward(f);
//! assert!((tape.adjoint(x) - (5.0 + 1.0 / 3.0)).abs() < 1e-12);
//! assert!((tape.adjoint(y) - 3.0).abs() < 1e-12);
//! ```
//!
//! The tape uses interior mutability and is not `Sync`; build one per thread.

use std::cell::RefCell;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

use statrs::function::gamma::ln_gamma;

use crate::scalar::Scalar;
use crate::tape::{Tape, Var};

/// Shared recording tape for [`Reverse`] values.
#[derive(Debug, Default)]
pub struct ReverseTape {
    tape: RefCell<Tape>,
}

impl ReverseTape {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self { tape: RefCell::new(Tape::new()) }
    }

    /// Create a tape pre-allocated for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { tape: RefCell::new(Tape::with_capacity(capacity)) }
    }

    /// Record an independent variable.
    pub fn var(&self, val: f64) -> Reverse<'_> {
        let v = self.tape.borrow_mut().var(val);
        Reverse { val, node: Some((self, v)) }
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.tape.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.tape.borrow().is_empty()
    }

    /// Drop all recorded nodes. Requires that no [`Reverse`] borrows the tape.
    pub fn clear(&mut self) {
        self.tape.get_mut().clear();
    }

    /// Back-propagate from `out`. A constant output yields all-zero adjoints.
    ///
    /// # Panics
    /// If `out` was recorded on a different tape.
    pub fn backward(&self, out: Reverse<'_>) {
        let node = self.node_of(out);
        let mut tape = self.tape.borrow_mut();
        let root = match node {
            Some(v) => v,
            None => tape.constant(out.val),
        };
        tape.backward(root);
    }

    /// ∂out/∂v after [`backward`](ReverseTape::backward); 0 for constants.
    ///
    /// # Panics
    /// If `v` was recorded on a different tape.
    pub fn adjoint(&self, v: Reverse<'_>) -> f64 {
        match self.node_of(v) {
            Some(var) => self.tape.borrow().adjoint(var),
            None => 0.0,
        }
    }

    /// Adjoints of several inputs, in order.
    pub fn gradient(&self, vars: &[Reverse<'_>]) -> Vec<f64> {
        vars.iter().map(|&v| self.adjoint(v)).collect()
    }

    fn node_of(&self, v: Reverse<'_>) -> Option<Var> {
        v.node.map(|(owner, var)| {
            assert_same_tape(owner, self);
            var
        })
    }
}

/// `Var` indices are only meaningful on the tape that issued them.
#[inline]
fn assert_same_tape(a: &ReverseTape, b: &ReverseTape) {
    assert!(std::ptr::eq(a, b), "Reverse values recorded on different ReverseTapes were combined");
}

/// A scalar whose operations are recorded on a [`ReverseTape`].
#[derive(Debug, Clone, Copy)]
pub struct Reverse<'t> {
    val: f64,
    node: Option<(&'t ReverseTape, Var)>,
}

impl<'t> Reverse<'t> {
    /// A tape-free constant.
    #[inline]
    pub fn constant(val: f64) -> Self {
        Self { val, node: None }
    }

    /// Primal value.
    #[inline]
    pub fn val(&self) -> f64 {
        self.val
    }

    /// Whether this value depends on a recorded variable.
    #[inline]
    pub fn is_recorded(&self) -> bool {
        self.node.is_some()
    }

    #[inline]
    fn on(self, tape: &mut Tape) -> Var {
        match self.node {
            Some((_, v)) => v,
            None => tape.constant(self.val),
        }
    }

    #[inline]
    fn unary(self, const_val: f64, record: impl FnOnce(&mut Tape, Var) -> Var) -> Self {
        let Some((owner, a)) = self.node else {
            return Self::constant(const_val);
        };
        let mut guard = owner.tape.borrow_mut();
        let tape: &mut Tape = &mut guard;
        let out = record(&mut *tape, a);
        Self { val: tape.val(out), node: Some((owner, out)) }
    }

    #[inline]
    fn binary(
        self,
        rhs: Self,
        const_val: f64,
        record: impl FnOnce(&mut Tape, Var, Var) -> Var,
    ) -> Self {
        let owner = match (self.node, rhs.node) {
            (None, None) => return Self::constant(const_val),
            (Some((owner, _)), _) | (None, Some((owner, _))) => owner,
        };
        if let (Some((a, _)), Some((b, _))) = (self.node, rhs.node) {
            assert_same_tape(a, b);
        }
        let mut guard = owner.tape.borrow_mut();
        let tape: &mut Tape = &mut guard;
        let a = self.on(tape);
        let b = rhs.on(tape);
        let out = record(&mut *tape, a, b);
        Self { val: tape.val(out), node: Some((owner, out)) }
    }
}

impl Add for Reverse<'_> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.binary(rhs, self.val + rhs.val, |t, a, b| t.add(a, b))
    }
}

impl Sub for Reverse<'_> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.binary(rhs, self.val - rhs.val, |t, a, b| t.sub(a, b))
    }
}

impl Mul for Reverse<'_> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.binary(rhs, self.val * rhs.val, |t, a, b| t.mul(a, b))
    }
}

impl Div for Reverse<'_> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.binary(rhs, self.val / rhs.val, |t, a, b| t.div(a, b))
    }
}

impl Neg for Reverse<'_> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.unary(-self.val, |t, a| t.neg(a))
    }
}

impl Sum for Reverse<'_> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Reverse::constant(0.0), |acc, x| acc + x)
    }
}

impl PartialEq for Reverse<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl PartialOrd for Reverse<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.val.partial_cmp(&other.val)
    }
}

impl Scalar for Reverse<'_> {
    #[inline]
    fn from_f64(v: f64) -> Self {
        Reverse::constant(v)
    }

    #[inline]
    fn value(&self) -> f64 {
        self.val
    }

    #[inline]
    fn ln(self) -> Self {
        self.unary(self.val.ln(), |t, a| t.ln(a))
    }

    #[inline]
    fn pow(self, exp: Self) -> Self {
        self.binary(exp, self.val.powf(exp.val), |t, a, b| t.pow(a, b))
    }

    #[inline]
    fn lgamma(self) -> Self {
        self.unary(ln_gamma(self.val), |t, a| t.lgamma(a))
    }

}

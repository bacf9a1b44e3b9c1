//! Guarded integrands — clamp non-finite samples before they reach quadrature.
//!
//! Purpose
//! -------
//! The zeta integrands overflow or divide by zero at the extreme abscissas of
//! the exp-sinh rule (`t → 0` and very large `t`). A single NaN/Inf sample would
//! poison both the running integral and the error estimate, so samples that are
//! not finite are replaced by `0.0` before they are accumulated.
//!
//! Key behaviors
//! -------------
//! - [`GuardedIntegrand::eval`] forwards to the wrapped closure and returns
//!   `0.0` for any non-finite value.
//! - Every clamp is counted; [`GuardedIntegrand::clamped`] reports the count so
//!   checked evaluators can expose it alongside the quadrature diagnostics.
//!
//! Invariants & assumptions
//! ------------------------
//! - This is an approximation. It is only harmless when the clamped points
//!   carry negligible mass of the true integral, which holds for ζ(s, a) with
//!   `s > 1`, `a > 0`. Outside that range the bias is unquantified.
use std::cell::Cell;

/// Integrand wrapper that maps non-finite samples to zero and counts them.
#[derive(Debug)]
pub struct GuardedIntegrand<F> {
    f: F,
    clamped: Cell<usize>,
}

impl<F: Fn(f64) -> f64> GuardedIntegrand<F> {
    pub fn new(f: F) -> Self {
        Self { f, clamped: Cell::new(0) }
    }

    /// Evaluate the wrapped integrand, clamping NaN/±∞ to `0.0`.
    pub fn eval(&self, t: f64) -> f64 {
        let value = (self.f)(t);
        if value.is_finite() {
            value
        } else {
            self.clamped.set(self.clamped.get() + 1);
            0.0
        }
    }

    /// Number of samples clamped so far.
    pub fn clamped(&self) -> usize {
        self.clamped.get()
    }
}

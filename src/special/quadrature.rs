//! special::quadrature — exp-sinh quadrature on the half line (0, ∞).
//!
//! Purpose
//! -------
//! Integrate functions over `(0, ∞)` that may have an integrable singularity at
//! the origin and decay (at least algebraically) at infinity, as required by
//! the integral representation of the Hurwitz zeta function.
//!
//! Key behaviors
//! -------------
//! - Apply the double-exponential substitution
//!   `x = exp(π/2 · sinh t)`, `dx = π/2 · cosh t · x dt`, which maps the half
//!   line onto `t ∈ ℝ` and makes the transformed integrand decay
//!   double-exponentially in both directions.
//! - Evaluate the trapezoid rule in `t`, starting at step `h = 1` and halving
//!   `h` at each refinement level; each level only evaluates the new odd
//!   abscissas and reuses the previous sum.
//! - Track the L1 norm `h · Σ|f·w|` alongside the integral, and use the
//!   difference of successive levels as the error estimate.
//!
//! Invariants & assumptions
//! ------------------------
//! - The `t` range is truncated to `|t| ≤ T` with `π/2 · sinh T = 700`, so both
//!   abscissas and weights are finite normal `f64` values. Mass of the true
//!   integral beyond `x ∈ [e^-700, e^700]` is ignored.
//! - The integrand is evaluated as given; non-finite samples are *not*
//!   filtered here. Callers that need that wrap their integrand in
//!   [`GuardedIntegrand`](crate::special::guards::GuardedIntegrand).
//! - The integrator keeps no state between calls.
//!
//! Conventions
//! -----------
//! - Level `k` has step `h = 2^-k`; [`QuadOutcome::levels`] is the last level
//!   evaluated (level 0 alone is never accepted).
//! - Termination: `levels ≥ min_levels` and `error ≤ tolerance · l1_norm`, or
//!   `levels == max_levels`, whichever happens first.
use std::f64::consts::FRAC_PI_2;

use crate::special::options::ZetaOptions;

/// Largest exponent `π/2 · sinh t` admitted on either side of the origin.
const LOG_ABSCISSA_LIMIT: f64 = 700.0;

/// Diagnostics and value of one quadrature run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadOutcome {
    /// Approximate integral.
    pub value: f64,
    /// `|I_k − I_{k−1}|` at the last level.
    pub error: f64,
    /// Approximate `∫|f|`.
    pub l1_norm: f64,
    /// Last refinement level evaluated.
    pub levels: usize,
    /// Number of integrand evaluations.
    pub evaluations: usize,
}

impl QuadOutcome {
    /// `true` when the error estimate met `tolerance · l1_norm`.
    pub fn within_tolerance(&self, tolerance: f64) -> bool {
        self.error <= tolerance * self.l1_norm
    }
}

/// Exp-sinh integrator for `(0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpSinh {
    tolerance: f64,
    min_levels: usize,
    max_levels: usize,
    t_max: f64,
}

impl ExpSinh {
    /// Build an integrator from validated options.
    pub fn new(opts: &ZetaOptions) -> Self {
        Self {
            tolerance: opts.tolerance,
            min_levels: opts.min_levels,
            max_levels: opts.max_levels,
            t_max: (LOG_ABSCISSA_LIMIT / FRAC_PI_2).asinh(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Integrate `f` over `(0, ∞)`.
    pub fn integrate<F: Fn(f64) -> f64>(&self, f: F) -> QuadOutcome {
        let mut evaluations = 0;

        // Level 0: every integer t in [−T, T].
        let n0 = self.t_max.floor() as i64;
        let (mut sum, mut abs_sum) = (0.0, 0.0);
        for m in -n0..=n0 {
            let term = self.weighted_sample(&f, m as f64);
            sum += term;
            abs_sum += term.abs();
            evaluations += 1;
        }
        let mut h = 1.0;
        let mut value = h * sum;
        let mut l1_norm = h * abs_sum;
        let mut error = f64::INFINITY;
        let mut levels = 0;

        while levels < self.max_levels {
            levels += 1;
            h *= 0.5;
            let n = (self.t_max / h).floor() as i64;
            let start = if n % 2 == 0 { -(n - 1) } else { -n };
            let (mut new_sum, mut new_abs) = (0.0, 0.0);
            let mut m = start;
            while m <= n {
                let term = self.weighted_sample(&f, m as f64 * h);
                new_sum += term;
                new_abs += term.abs();
                evaluations += 1;
                m += 2;
            }
            let refined = 0.5 * value + h * new_sum;
            l1_norm = 0.5 * l1_norm + h * new_abs;
            error = (refined - value).abs();
            value = refined;
            if levels >= self.min_levels && error <= self.tolerance * l1_norm {
                break;
            }
        }

        QuadOutcome { value, error, l1_norm, levels, evaluations }
    }

    // ---- Helper methods ----

    /// `f(x(t)) · x'(t)` for the exp-sinh substitution.
    fn weighted_sample<F: Fn(f64) -> f64>(&self, f: &F, t: f64) -> f64 {
        let x = (FRAC_PI_2 * t.sinh()).exp();
        let w = FRAC_PI_2 * t.cosh() * x;
        f(x) * w
    }
}

//! Numerical stability utilities.
//!
//! Guarded versions of the softplus family. A fixed cutoff
//! ([`SOFTPLUS_CUTOFF`]) switches to the asymptotic form once `exp(x)` would
//! dominate `1` to full `f64` precision.
//!
//! # Provided items
//! - [`safe_softplus(x)`]: `ln(1 + exp(x))`, ℝ → (0, ∞).
//! - [`safe_softplus_inv(x)`]: `ln(exp(x) − 1)`, (0, ∞) → ℝ.
//! - [`safe_logistic(x)`]: `1 / (1 + exp(−x))`, the derivative of softplus.

/// Above this input, `softplus(x) == x` and `softplus_inv(x) == x` to `f64`
/// precision.
pub const SOFTPLUS_CUTOFF: f64 = 20.0;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// For `x > SOFTPLUS_CUTOFF` the result is `x`; otherwise `ln1p(exp(x))`,
/// which stays accurate for large negative `x`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > SOFTPLUS_CUTOFF { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: `t = ln(exp(x) − 1)`.
///
/// For `x > SOFTPLUS_CUTOFF` the result is `x`; otherwise `ln(expm1(x))`.
/// The caller guarantees `x` is finite and `> 0`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > SOFTPLUS_CUTOFF { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(−x))`.
///
/// Evaluates `exp` only on non-positive arguments, so neither tail overflows.
/// This is `d softplus(x) / dx`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

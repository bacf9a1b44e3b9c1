//! special::hurwitz — Hurwitz zeta function ζ(s, a) and its s-derivative.
//!
//! Purpose
//! -------
//! Evaluate ζ(s, a) = Σ_{n≥0} (n + a)^(−s) through its integral representation
//!
//! ```text
//! ζ(s, a) = 1/Γ(s) · ∫₀^∞ t^(s−1) e^(−a t) / (1 − e^(−t)) dt
//! ```
//!
//! and its partial derivative in `s`
//!
//! ```text
//! ∂ζ/∂s = 1/Γ(s) · ∫₀^∞ x^(s−1) e^(−a x) / (1 − e^(−x)) · (ln x − ψ(s)) dx
//! ```
//!
//! using exp-sinh quadrature, and record the pair as a node on a reverse-mode
//! tape for gradient-based callers.
//!
//! Key behaviors
//! -------------
//! - [`hurwitz_zeta`] / [`hurwitz_zeta_prime`]: plain `f64` evaluators with
//!   tolerance `√ε`. No validation; results are trusted unconditionally.
//! - [`hurwitz_zeta_var`]: evaluates both integrals and pushes a
//!   precomputed-gradient node `(ζ, s, ∂ζ/∂s)` onto the caller's [`Tape`]. The
//!   shift `a` is a constant and is never differentiated.
//! - [`hurwitz_zeta_checked`] / [`hurwitz_zeta_prime_checked`] /
//!   [`hurwitz_zeta_var_checked`]: reject inputs outside `s > 1`, `a > 0`,
//!   reject non-finite or unresolved results, and report the quadrature
//!   diagnostics with a [`ZetaStatus`] instead of discarding them.
//! - [`ln_hurwitz_zeta_checked`] / [`ln_hurwitz_zeta_var_checked`]: ln ζ and
//!   its s-derivative, finite even where ζ(s, a) underflows.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both integrals are taken in `u = a t` and normalized by `a^(−s) Γ(s)`:
//!
//!   ```text
//!   a^s ζ(s, a)   = ∫₀^∞ g(u) du
//!   a^s ∂ζ/∂s     = ∫₀^∞ g(u) (ln u − ln a − ψ(s)) du
//!   g(u)          = exp((s−1) ln u − u − ln Γ(s)) / (1 − e^(−u/a))
//!   ```
//!
//!   `g` is a Gamma(s, 1) density divided by `1 − e^(−u/a)`, so its peak is
//!   O(1) for every `s > 1`. Neither Γ(s) overflow (s ≳ 171.6) nor the
//!   underflow of `a^(−s)` happens inside the quadrature; the factor `a^(−s)`
//!   is applied last.
//! - Both integrands are wrapped in [`GuardedIntegrand`], so non-finite
//!   samples (`0/0` where `u/a` underflows near 0) count as 0. This is an
//!   approximation and is only known to be harmless for `s > 1`, `a > 0`.
//! - The unchecked path and the checked path with `ZetaOptions::default()`
//!   perform the same floating-point operations and agree bit for bit.
//!
//! Accuracy
//! --------
//! - The derivative weight `ln u − ln a − ψ(s)` has mean zero under the
//!   Gamma density, so ∂ζ/∂s is a small difference of O(1) terms whenever
//!   `a^s ζ(s, a) ≈ 1`. For `a ≈ 1` and large `s` (beyond about 30) the
//!   relative error of [`hurwitz_zeta_prime`] grows without bound, even
//!   when the status is `Converged`. For `a ≥ 2` the `−ln a` term dominates
//!   the weight and no cancellation occurs.
//!
//! Conventions
//! -----------
//! - ln Γ and ψ come from `statrs::function::gamma`.
//! - Unchecked evaluators let domain violations propagate as NaN/Inf or as
//!   a meaningless finite value.
//! - Nothing here logs or touches global state; the only side effect is the
//!   node pushed onto a caller-supplied tape.
use statrs::function::gamma::{digamma, ln_gamma};

use crate::{
    autodiff::tape::{Tape, Var},
    special::{
        errors::{ZetaError, ZetaResult},
        guards::GuardedIntegrand,
        options::ZetaOptions,
        quadrature::{ExpSinh, QuadOutcome},
    },
};

/// Whether the quadrature met its own error criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZetaStatus {
    /// `error ≤ tolerance · l1_norm` within the allowed refinement levels.
    Converged,
    /// Refinement levels were exhausted before the criterion was met; the
    /// value is still the best available estimate.
    ConvergenceUncertain,
}

/// Value and diagnostics of a checked evaluation.
///
/// Fields
/// ------
/// - `value`: ζ(s, a) or ∂ζ/∂s (the `a^s`-scaled integral for the log-scale
///   overloads).
/// - `error`, `l1_norm`: quadrature diagnostics in the same units as `value`.
/// - `levels`, `evaluations`: refinement depth and integrand call count.
/// - `clamped`: number of non-finite samples replaced by zero.
/// - `status`: convergence verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZetaOutcome {
    pub value: f64,
    pub error: f64,
    pub l1_norm: f64,
    pub levels: usize,
    pub evaluations: usize,
    pub clamped: usize,
    pub status: ZetaStatus,
}

// ---- Unchecked evaluators ----

/// ζ(s, a) by exp-sinh quadrature at tolerance `√ε`.
///
/// No validation is performed. For `s ≤ 1` or `a ≤ 0` the integral does not
/// represent ζ and the result is meaningless or NaN.
///
/// # Examples
/// ```rust
/// use rust_hurwitz::special::hurwitz::hurwitz_zeta;
///
/// let z = hurwitz_zeta(2.0, 1.0);
/// assert!((z - std::f64::consts::PI.powi(2) / 6.0).abs() < 1e-8);
/// ```
pub fn hurwitz_zeta(s: f64, a: f64) -> f64 {
    let (out, _) = integrate_zeta(s, a, &ExpSinh::new(&ZetaOptions::default()));
    out.value * a.powf(-s)
}

/// ∂ζ(s, a)/∂s by exp-sinh quadrature at tolerance `√ε`.
///
/// Same silent domain behavior as [`hurwitz_zeta`]. Loses relative accuracy
/// when ζ(s, a) is close to `a^(−s)`, i.e. for large `s` at `a ≈ 1`; see the
/// module docs.
pub fn hurwitz_zeta_prime(s: f64, a: f64) -> f64 {
    let (out, _) = integrate_zeta_prime(s, a, &ExpSinh::new(&ZetaOptions::default()));
    out.value * a.powf(-s)
}

/// Gradient-aware ζ(s, a): returns a tape variable whose value is
/// `hurwitz_zeta(s, a)` and whose local derivative w.r.t. `s` is
/// `hurwitz_zeta_prime(s, a)`.
///
/// Two independent quadratures are run. Backpropagation through the returned
/// variable multiplies upstream adjoints by `∂ζ/∂s` into `s`; nothing flows
/// into `a`.
///
/// # Errors
/// - [`ZetaError::Tape`] when `s` was not recorded on `tape`.
pub fn hurwitz_zeta_var(tape: &mut Tape, s: Var, a: f64) -> ZetaResult<Var> {
    let s_val = s.value();
    let f = hurwitz_zeta(s_val, a);
    let deriv = hurwitz_zeta_prime(s_val, a);
    Ok(tape.precomputed(f, s, deriv)?)
}

// ---- Checked evaluators ----

/// ζ(s, a) with domain validation and quadrature diagnostics.
///
/// # Errors
/// - [`ZetaError::InvalidS`] unless `s` is finite and `> 1`.
/// - [`ZetaError::InvalidA`] unless `a` is finite and `> 0`.
/// - [`ZetaError::NonFiniteResult`] if the result is NaN/Inf.
/// - [`ZetaError::Unresolved`] when refinement ran out of levels with an
///   error estimate at least as large as the value, or when the estimate of
///   `a^s ζ(s, a)` falls below its lower bound 1.
///
/// A result below the smallest `f64` is returned as `0.0`; use
/// [`ln_hurwitz_zeta_checked`] there.
pub fn hurwitz_zeta_checked(s: f64, a: f64, opts: &ZetaOptions) -> ZetaResult<ZetaOutcome> {
    let (out, clamped) = scaled_zeta_integral(s, a, opts)?;
    finish(s, a, out, clamped, opts.tolerance, a.powf(-s))
}

/// ∂ζ(s, a)/∂s with domain validation and quadrature diagnostics.
///
/// # Errors
/// Same as [`hurwitz_zeta_checked`].
pub fn hurwitz_zeta_prime_checked(
    s: f64, a: f64, opts: &ZetaOptions,
) -> ZetaResult<ZetaOutcome> {
    validate_domain(s, a)?;
    let (out, clamped) = integrate_zeta_prime(s, a, &ExpSinh::new(opts));
    finish(s, a, out, clamped, opts.tolerance, a.powf(-s))
}

/// Gradient-aware ζ(s, a) built from the checked evaluators.
///
/// Returns the tape variable together with the diagnostics of both
/// quadratures `(value, derivative)`.
///
/// # Errors
/// - Domain and non-finite errors from either checked evaluator.
/// - [`ZetaError::Tape`] when `s` was not recorded on `tape`.
pub fn hurwitz_zeta_var_checked(
    tape: &mut Tape, s: Var, a: f64, opts: &ZetaOptions,
) -> ZetaResult<(Var, ZetaOutcome, ZetaOutcome)> {
    let s_val = s.value();
    let f = hurwitz_zeta_checked(s_val, a, opts)?;
    let deriv = hurwitz_zeta_prime_checked(s_val, a, opts)?;
    let var = tape.precomputed(f.value, s, deriv.value)?;
    Ok((var, f, deriv))
}

// ---- Log-scale evaluators ----

/// ln ζ(s, a) with the same validation as [`hurwitz_zeta_checked`].
///
/// Evaluated as `ln(a^s ζ(s, a)) − s ln a`, which stays finite where
/// ζ(s, a) itself underflows (`s ln a ≳ 708`).
///
/// # Errors
/// Same as [`hurwitz_zeta_checked`].
pub fn ln_hurwitz_zeta_checked(s: f64, a: f64, opts: &ZetaOptions) -> ZetaResult<f64> {
    let scaled = scaled_zeta_checked(s, a, opts)?;
    ln_from_scaled(s, a, scaled.value)
}

/// Gradient-aware ln ζ(s, a): a tape variable with value
/// [`ln_hurwitz_zeta_checked`] and local partial `(∂ζ/∂s) / ζ`.
///
/// The outcomes describe the scaled integrals `a^s ζ(s, a)` and
/// `a^s ∂ζ/∂s`; the recorded partial is their ratio, so it is available
/// even where ζ and ∂ζ/∂s are both below the smallest `f64`.
///
/// # Errors
/// - Domain, non-finite and unresolved errors from either quadrature.
/// - [`ZetaError::Tape`] when `s` was not recorded on `tape`.
pub fn ln_hurwitz_zeta_var_checked(
    tape: &mut Tape, s: Var, a: f64, opts: &ZetaOptions,
) -> ZetaResult<(Var, ZetaOutcome, ZetaOutcome)> {
    let s_val = s.value();
    let f = scaled_zeta_checked(s_val, a, opts)?;
    let (out, clamped) = integrate_zeta_prime(s_val, a, &ExpSinh::new(opts));
    let deriv = finish(s_val, a, out, clamped, opts.tolerance, 1.0)?;
    let ln_value = ln_from_scaled(s_val, a, f.value)?;
    let var = tape.precomputed(ln_value, s, deriv.value / f.value)?;
    Ok((var, f, deriv))
}

// ---- Helper methods ----

/// `∫₀^∞ g(u) · w(u) du` with the normalized kernel
///
/// ```text
/// g(u) = u^(s−1) e^(−u) / (Γ(s) · (1 − e^(−u/a)))
/// ```
///
/// obtained from the zeta integrand by `t = u/a` and division by `a^(−s) Γ(s)`.
/// The exponent is assembled in log space, so `g` stays representable for
/// any finite `s > 1` and the integral is `a^s ζ(s, a) ≥ 1`.
fn integrate_scaled<W: Fn(f64) -> f64>(
    s: f64, a: f64, quad: &ExpSinh, weight: W,
) -> (QuadOutcome, usize) {
    let ln_gamma_s = ln_gamma(s);
    let integrand = GuardedIntegrand::new(|u: f64| {
        ((s - 1.0) * u.ln() - u - ln_gamma_s).exp() / -(-u / a).exp_m1() * weight(u)
    });
    let out = quad.integrate(|u| integrand.eval(u));
    (out, integrand.clamped())
}

/// `a^s ζ(s, a)`.
fn integrate_zeta(s: f64, a: f64, quad: &ExpSinh) -> (QuadOutcome, usize) {
    integrate_scaled(s, a, quad, |_| 1.0)
}

/// `a^s ∂ζ/∂s`; in `u` the log weight becomes `ln u − ln a − ψ(s)`.
fn integrate_zeta_prime(s: f64, a: f64, quad: &ExpSinh) -> (QuadOutcome, usize) {
    let shift = a.ln() + digamma(s);
    integrate_scaled(s, a, quad, |u| u.ln() - shift)
}

/// Validated `a^s ζ(s, a)`. The exact value is `1 + Σ_{n≥1} (1 + n/a)^(−s)`,
/// so an estimate clearly below 1 means the Gamma peak fell between the
/// abscissas of every level (very large `s`).
fn scaled_zeta_integral(s: f64, a: f64, opts: &ZetaOptions) -> ZetaResult<(QuadOutcome, usize)> {
    validate_domain(s, a)?;
    let (out, clamped) = integrate_zeta(s, a, &ExpSinh::new(opts));
    if out.value < 1.0 - out.error - 8.0 * opts.tolerance {
        let scale = a.powf(-s);
        return Err(ZetaError::Unresolved {
            s,
            a,
            value: out.value * scale,
            error: out.error * scale,
        });
    }
    Ok((out, clamped))
}

fn scaled_zeta_checked(s: f64, a: f64, opts: &ZetaOptions) -> ZetaResult<ZetaOutcome> {
    let (out, clamped) = scaled_zeta_integral(s, a, opts)?;
    finish(s, a, out, clamped, opts.tolerance, 1.0)
}

fn ln_from_scaled(s: f64, a: f64, scaled: f64) -> ZetaResult<f64> {
    let value = scaled.ln() - s * a.ln();
    if !value.is_finite() {
        return Err(ZetaError::NonFiniteResult { s, a, value });
    }
    Ok(value)
}

fn validate_domain(s: f64, a: f64) -> ZetaResult<()> {
    if !s.is_finite() {
        return Err(ZetaError::InvalidS { s, reason: "Exponent must be finite." });
    }
    if s <= 1.0 {
        return Err(ZetaError::InvalidS {
            s,
            reason: "Exponent must be > 1 for the integral representation to converge.",
        });
    }
    if !a.is_finite() {
        return Err(ZetaError::InvalidA { a, reason: "Shift must be finite." });
    }
    if a <= 0.0 {
        return Err(ZetaError::InvalidA { a, reason: "Shift must be > 0." });
    }
    Ok(())
}

fn finish(
    s: f64, a: f64, out: QuadOutcome, clamped: usize, tolerance: f64, scale: f64,
) -> ZetaResult<ZetaOutcome> {
    let value = out.value * scale;
    if !value.is_finite() {
        return Err(ZetaError::NonFiniteResult { s, a, value });
    }
    let status = if out.within_tolerance(tolerance) {
        ZetaStatus::Converged
    } else {
        ZetaStatus::ConvergenceUncertain
    };
    if status == ZetaStatus::ConvergenceUncertain && !(out.error < out.value.abs()) {
        return Err(ZetaError::Unresolved { s, a, value, error: out.error * scale });
    }
    Ok(ZetaOutcome {
        value,
        error: out.error * scale,
        l1_norm: out.l1_norm * scale,
        levels: out.levels,
        evaluations: out.evaluations,
        clamped,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of ζ(s, a) with closed forms and with a truncated series.
    // - The s-derivative against known values and central differences.
    // - The gradient-aware overload (forward value, recorded partial,
    //   backpropagation).
    // - The checked evaluators' domain policy and diagnostics.
    // - Determinism of repeated calls.
    //
    // They intentionally DO NOT cover:
    // - Behavior of the unchecked evaluators outside s > 1, a > 0, which is
    //   unspecified beyond "not validated".
    // -------------------------------------------------------------------------

    const ZETA_3: f64 = 1.202_056_903_159_594_2;
    const ZETA_PRIME_2: f64 = -0.937_548_254_315_843_8;

    /// Σ_{n<N} (n + a)^(−s) plus the Euler–Maclaurin tail beyond N.
    fn series_reference(s: f64, a: f64, n_terms: usize) -> f64 {
        let head: f64 = (0..n_terms).map(|n| (n as f64 + a).powf(-s)).sum();
        let x = n_terms as f64 + a;
        head + x.powf(1.0 - s) / (s - 1.0) + 0.5 * x.powf(-s) + s * x.powf(-s - 1.0) / 12.0
    }

    fn central_difference(s: f64, a: f64, h: f64) -> f64 {
        (hurwitz_zeta(s + h, a) - hurwitz_zeta(s - h, a)) / (2.0 * h)
    }

    #[test]
    // Purpose
    // -------
    // Check ζ(s, 1) against the Riemann zeta closed forms.
    //
    // Given
    // -----
    // - s ∈ {2, 3, 4}, a = 1.
    //
    // Expect
    // ------
    // - π²/6, ζ(3), π⁴/90 within 1e-6.
    fn riemann_special_values() {
        // Arrange
        let cases = [(2.0, PI * PI / 6.0), (3.0, ZETA_3), (4.0, PI.powi(4) / 90.0)];

        for (s, expected) in cases {
            // Act
            let z = hurwitz_zeta(s, 1.0);

            // Assert
            assert!((z - expected).abs() < 1e-6, "s = {s}: got {z}, expected {expected}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Compare ζ(s, a) with a truncated series at representative points.
    //
    // Given
    // -----
    // - (s, a) pairs spanning small/large shifts and non-integer exponents.
    // - A 10 000-term series with an Euler–Maclaurin tail correction.
    //
    // Expect
    // ------
    // - Relative agreement within 1e-6.
    fn matches_series_reference() {
        // Arrange
        let cases = [(2.0, 1.0), (3.0, 1.0), (2.5, 0.5), (1.5, 3.0), (4.0, 10.0), (2.0, 100.0)];

        for (s, a) in cases {
            // Act
            let z = hurwitz_zeta(s, a);
            let reference = series_reference(s, a, 10_000);

            // Assert
            assert_relative_eq!(z, reference, max_relative = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the derivative against the known value ζ'(2) and against central
    // differences of the value.
    //
    // Given
    // -----
    // - (s, a) ∈ {(2, 1), (3, 2)}, step h = 1e-5.
    //
    // Expect
    // ------
    // - ζ'(2, 1) ≈ −0.937548 and both points within 1e-4 relative of the
    //   central difference.
    fn derivative_matches_central_difference() {
        assert_relative_eq!(hurwitz_zeta_prime(2.0, 1.0), ZETA_PRIME_2, max_relative = 1e-6);

        for (s, a) in [(2.0, 1.0), (3.0, 2.0)] {
            // Act
            let analytic = hurwitz_zeta_prime(s, a);
            let numeric = central_difference(s, a, 1e-5);

            // Assert
            assert_relative_eq!(analytic, numeric, max_relative = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // Away from a ≈ 1 the derivative keeps full relative accuracy at large
    // exponents, where the series converges in a handful of terms.
    //
    // Given
    // -----
    // - a = 10 with s ∈ {50, 100}; reference −Σ_{n<400} ln(n + a) (n + a)^(−s).
    //
    // Expect
    // ------
    // - Relative agreement within 1e-9.
    fn derivative_accurate_for_large_shift() {
        let a = 10.0;
        for s in [50.0, 100.0] {
            // Arrange
            let reference: f64 = (0..400)
                .map(|n| {
                    let x = n as f64 + a;
                    -x.ln() * x.powf(-s)
                })
                .sum();

            // Act
            let d = hurwitz_zeta_prime(s, a);

            // Assert
            assert_relative_eq!(d, reference, max_relative = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the gradient-aware overload: same forward value as the plain
    // evaluator, recorded partial equal to the derivative evaluator, and
    // correct chain rule through downstream nodes.
    //
    // Given
    // -----
    // - s = 3 on a fresh tape, a = 2, y = ln ζ(s, a).
    //
    // Expect
    // ------
    // - z.value() == hurwitz_zeta(3, 2) exactly.
    // - ∂z/∂s == hurwitz_zeta_prime(3, 2) exactly.
    // - ∂y/∂s == ζ'/ζ.
    fn var_overload_matches_plain_evaluators() {
        // Arrange
        let (s0, a) = (3.0, 2.0);
        let mut tape = Tape::new();
        let s = tape.variable(s0);

        // Act
        let z = hurwitz_zeta_var(&mut tape, s, a).unwrap();
        let y = tape.ln(z).unwrap();
        let dz = tape.gradient(z).unwrap().wrt(s).unwrap();
        let dy = tape.gradient(y).unwrap().wrt(s).unwrap();

        // Assert
        let plain = hurwitz_zeta(s0, a);
        let prime = hurwitz_zeta_prime(s0, a);
        assert_eq!(z.value().to_bits(), plain.to_bits());
        assert_eq!(dz.to_bits(), prime.to_bits());
        assert_relative_eq!(dy, prime / plain, max_relative = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a variable from another tape is rejected by the overload.
    //
    // Given
    // -----
    // - `s` recorded on one tape, evaluation requested on another.
    //
    // Expect
    // ------
    // - `ZetaError::Tape(_)`.
    fn var_overload_rejects_foreign_variable() {
        // Arrange
        let mut owner = Tape::new();
        let mut other = Tape::new();
        let s = owner.variable(2.0);

        // Act
        let err = hurwitz_zeta_var(&mut other, s, 1.0).unwrap_err();

        // Assert
        assert!(matches!(err, ZetaError::Tape(_)));
        assert!(other.is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Checked evaluators with default options must agree bit for bit with the
    // unchecked ones and report convergence.
    //
    // Given
    // -----
    // - (s, a) = (2.5, 0.75).
    //
    // Expect
    // ------
    // - Identical bits for value and derivative; status `Converged`;
    //   levels within default bounds; positive L1 norm.
    fn checked_default_matches_unchecked() {
        // Arrange
        let (s, a) = (2.5, 0.75);
        let opts = ZetaOptions::default();

        // Act
        let z = hurwitz_zeta_checked(s, a, &opts).unwrap();
        let dz = hurwitz_zeta_prime_checked(s, a, &opts).unwrap();

        // Assert
        assert_eq!(z.value.to_bits(), hurwitz_zeta(s, a).to_bits());
        assert_eq!(dz.value.to_bits(), hurwitz_zeta_prime(s, a).to_bits());
        assert_eq!(z.status, ZetaStatus::Converged);
        assert!(z.levels >= opts.min_levels && z.levels <= opts.max_levels);
        assert!(z.l1_norm > 0.0);
        assert!(z.error <= opts.tolerance * z.l1_norm);
    }

    #[test]
    // Purpose
    // -------
    // Boundary policy: the checked evaluators reject the divergent domain.
    //
    // Given
    // -----
    // - s ∈ {1, 0.5, −2, NaN} with a = 1; a ∈ {0, −1, ∞} with s = 2.
    //
    // Expect
    // ------
    // - `InvalidS` for every bad exponent, `InvalidA` for every bad shift.
    fn checked_rejects_divergent_domain() {
        let opts = ZetaOptions::default();

        for s in [1.0, 0.5, -2.0, f64::NAN] {
            let err = hurwitz_zeta_checked(s, 1.0, &opts).unwrap_err();
            assert!(matches!(err, ZetaError::InvalidS { .. }), "s = {s}");
        }
        for a in [0.0, -1.0, f64::INFINITY] {
            let err = hurwitz_zeta_prime_checked(2.0, a, &opts).unwrap_err();
            assert!(matches!(err, ZetaError::InvalidA { .. }), "a = {a}");
        }
    }

    #[test]
    // Purpose
    // -------
    // A single refinement level with an unreachable tolerance must be
    // reported as uncertain rather than silently trusted.
    //
    // Given
    // -----
    // - Options with tolerance 1e-300 and min = max = 1 level.
    //
    // Expect
    // ------
    // - Status `ConvergenceUncertain`, levels == 1, value still finite.
    fn exhausted_levels_report_uncertain() {
        // Arrange
        let opts = ZetaOptions::new(1e-300, 1, 1).unwrap();

        // Act
        let z = hurwitz_zeta_checked(2.0, 1.0, &opts).unwrap();

        // Assert
        assert_eq!(z.status, ZetaStatus::ConvergenceUncertain);
        assert_eq!(z.levels, 1);
        assert!(z.value.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Exponents where Γ(s) overflows (s > 171.6) or where s^(s−1) would
    // overflow at the integrand peak must still evaluate correctly.
    //
    // Given
    // -----
    // - s ∈ {150, 172, 200} with a = 1, and s = 200 with a = 3.
    //
    // Expect
    // ------
    // - ζ(s, 1) = 1 + 2^(−s) + 3^(−s) and
    //   ζ(200, 3) = 3^(−200) (1 + (4/3)^(−200) + (5/3)^(−200)) within 1e-9.
    // - Status `Converged`.
    fn large_exponents_remain_accurate() {
        let opts = ZetaOptions::default();
        for s in [150.0, 172.0, 200.0] {
            // Act
            let z = hurwitz_zeta_checked(s, 1.0, &opts).unwrap();

            // Assert
            let expected = 1.0 + 2f64.powf(-s) + 3f64.powf(-s);
            assert_relative_eq!(z.value, expected, max_relative = 1e-9);
            assert_eq!(z.status, ZetaStatus::Converged, "s = {s}");
        }

        let z = hurwitz_zeta_checked(200.0, 3.0, &opts).unwrap();
        let expected =
            3f64.powf(-200.0) * (1.0 + (4.0f64 / 3.0).powf(-200.0) + (5.0f64 / 3.0).powf(-200.0));
        assert_relative_eq!(z.value, expected, max_relative = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // The log-scale evaluator agrees with ln ζ in the normal range and stays
    // finite where ζ itself underflows.
    //
    // Given
    // -----
    // - (s, a) = (2.5, 0.75) and (400, 10).
    //
    // Expect
    // ------
    // - ln ζ(2.5, 0.75) matches `hurwitz_zeta(..).ln()` within 1e-12.
    // - ζ(400, 10) is reported as 0.0 while ln ζ(400, 10) ≈ −400 ln 10.
    fn log_scale_survives_underflow() {
        // Arrange
        let opts = ZetaOptions::default();

        // Act
        let ln_normal = ln_hurwitz_zeta_checked(2.5, 0.75, &opts).unwrap();
        let tiny = hurwitz_zeta_checked(400.0, 10.0, &opts).unwrap();
        let ln_tiny = ln_hurwitz_zeta_checked(400.0, 10.0, &opts).unwrap();

        // Assert
        assert_relative_eq!(ln_normal, hurwitz_zeta(2.5, 0.75).ln(), max_relative = 1e-12);
        assert_eq!(tiny.value, 0.0);
        assert_relative_eq!(ln_tiny, -400.0 * 10f64.ln(), max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The log-scale overload records ∂ ln ζ/∂s = ζ'/ζ on the tape.
    //
    // Given
    // -----
    // - s = 3 on a fresh tape, a = 2.
    //
    // Expect
    // ------
    // - Value ln ζ(3, 2) and gradient ζ'(3, 2)/ζ(3, 2) within 1e-10.
    fn ln_var_records_logarithmic_derivative() {
        // Arrange
        let mut tape = Tape::new();
        let s = tape.variable(3.0);

        // Act
        let (y, f, d) =
            ln_hurwitz_zeta_var_checked(&mut tape, s, 2.0, &ZetaOptions::default()).unwrap();
        let dy = tape.gradient(y).unwrap().wrt(s).unwrap();

        // Assert
        let (zeta, zeta_prime) = (hurwitz_zeta(3.0, 2.0), hurwitz_zeta_prime(3.0, 2.0));
        assert_relative_eq!(y.value(), zeta.ln(), max_relative = 1e-10);
        assert_relative_eq!(dy, zeta_prime / zeta, max_relative = 1e-10);
        assert_relative_eq!(f.value, 8.0 * zeta, max_relative = 1e-12);
        assert_relative_eq!(d.value, 8.0 * zeta_prime, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // An unconverged quadrature whose error estimate swamps its value is an
    // error, while a merely uncertain one is returned with its status.
    //
    // Given
    // -----
    // - Raw outcomes with value 1 and error 2 (unresolved) or 1e-3
    //   (uncertain), tolerance 1e-8.
    //
    // Expect
    // ------
    // - `ZetaError::Unresolved` for the first, `ConvergenceUncertain` for
    //   the second.
    fn unresolved_quadrature_is_rejected() {
        // Arrange
        let raw = |error: f64| QuadOutcome {
            value: 1.0,
            error,
            l1_norm: 1.0,
            levels: 9,
            evaluations: 100,
        };

        // Act
        let unresolved = finish(200.0, 1.0, raw(2.0), 0, 1e-8, 1.0);
        let uncertain = finish(200.0, 1.0, raw(1e-3), 0, 1e-8, 1.0).unwrap();

        // Assert
        assert!(matches!(unresolved, Err(ZetaError::Unresolved { .. })));
        assert_eq!(uncertain.status, ZetaStatus::ConvergenceUncertain);
    }

    #[test]
    // Purpose
    // -------
    // The checked autodiff overload must record the same node as the
    // unchecked one for in-domain input.
    //
    // Given
    // -----
    // - s = 2 on a tape, a = 1, default options.
    //
    // Expect
    // ------
    // - Same value and same gradient as `hurwitz_zeta_var`.
    fn checked_var_overload_matches_unchecked() {
        // Arrange
        let mut tape = Tape::new();
        let s = tape.variable(2.0);

        // Act
        let (z_checked, f, d) =
            hurwitz_zeta_var_checked(&mut tape, s, 1.0, &ZetaOptions::default()).unwrap();
        let z_plain = hurwitz_zeta_var(&mut tape, s, 1.0).unwrap();

        // Assert
        assert_eq!(z_checked.value(), z_plain.value());
        assert_eq!(f.value, z_plain.value());
        let g_checked = tape.gradient(z_checked).unwrap().wrt(s).unwrap();
        let g_plain = tape.gradient(z_plain).unwrap().wrt(s).unwrap();
        assert_eq!(g_checked, g_plain);
        assert_eq!(d.value, g_plain);
    }

    #[test]
    // Purpose
    // -------
    // Repeated calls with identical inputs must be bit-identical.
    //
    // Given
    // -----
    // - (s, a) = (1.7, 4.2) evaluated three times.
    //
    // Expect
    // ------
    // - All three results share the same bit pattern.
    fn repeated_calls_are_bit_identical() {
        let first = hurwitz_zeta(1.7, 4.2).to_bits();
        let second = hurwitz_zeta(1.7, 4.2).to_bits();
        let third = hurwitz_zeta(1.7, 4.2).to_bits();
        assert_eq!(first, second);
        assert_eq!(second, third);
    }
}

//! Validation helpers shared by the optimizer layer.
//!
//! - [`verify_tol_grad`], [`verify_tol_cost`]: optional tolerances are finite
//!   and strictly positive.
//! - [`validate_grad`], [`validate_hessian`]: shape and finiteness of
//!   derivatives returned by models or finite differences.
//! - [`validate_theta_hat`], [`validate_value`]: the final estimate and
//!   log-likelihood are finite.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// # Errors
/// [`OptError::InvalidTolGrad`] if `Some(tol)` is non-finite or ≤ 0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    check_tolerance(tol, |tol, reason| OptError::InvalidTolGrad { tol, reason })
}

/// # Errors
/// [`OptError::InvalidTolCost`] if `Some(tol)` is non-finite or ≤ 0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    check_tolerance(tol, |tol, reason| OptError::InvalidTolCost { tol, reason })
}

/// Check `grad.len() == dim` and that every entry is finite.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] on length mismatch.
/// - [`OptError::InvalidGradient`] for the first non-finite entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match first_non_finite(grad.iter().copied().enumerate()) {
        Some((index, value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Unwrap the solver's best parameter vector, requiring finite entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if absent.
/// - [`OptError::InvalidThetaHat`] for the first non-finite entry.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta_hat = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, value)) = first_non_finite(theta_hat.iter().copied().enumerate()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta_hat)
}

/// # Errors
/// [`OptError::NonFiniteCost`] if `value` is NaN or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    value.is_finite().then_some(()).ok_or(OptError::NonFiniteCost { value })
}

/// Check that `hessian` is `dim × dim` with finite entries.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] on shape mismatch.
/// - [`OptError::InvalidHessian`] for the first non-finite entry.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    let found = hessian.dim();
    if found != (dim, dim) {
        return Err(OptError::HessianDimMismatch { expected: dim, found });
    }
    match first_non_finite(hessian.indexed_iter().map(|(rc, &v)| (rc, v))) {
        Some(((row, col), value)) => Err(OptError::InvalidHessian { row, col, value }),
        None => Ok(()),
    }
}

// ---- Helper methods ----

fn check_tolerance(
    tol: Option<f64>, reject: impl Fn(f64, &'static str) -> OptError,
) -> OptResult<()> {
    match tol {
        Some(t) if !t.is_finite() => Err(reject(t, "Tolerance must be finite.")),
        Some(t) if t <= 0.0 => Err(reject(t, "Tolerance must be positive.")),
        _ => Ok(()),
    }
}

fn first_non_finite<I>(entries: impl IntoIterator<Item = (I, f64)>) -> Option<(I, f64)> {
    entries.into_iter().find(|(_, value)| !value.is_finite())
}

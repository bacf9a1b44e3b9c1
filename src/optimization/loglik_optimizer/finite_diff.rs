//! loglik_optimizer::finite_diff — finite-difference gradients and Hessians.
//!
//! Purpose
//! -------
//! Wrap the `finitediff` crate with error capture, validation and symmetry
//! cleanup, so the optimizer and model layers can ask for derivatives
//! without touching its API.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient of a scalar objective,
//!   surfacing any error the objective parked in `closure_err`.
//! - [`compute_hessian`]: Jacobian of a gradient function, central
//!   differences first with a forward-difference fallback, symmetrized.
//!
//! Downstream usage
//! ----------------
//! - The Argmin adapter falls back to [`run_fd_diff`] when a model has no
//!   analytic gradient.
//! - The power-law fit differentiates its analytic score with
//!   [`compute_hessian`] to obtain the observed information.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient with error capture and validation.
///
/// `func` must write its first failure into `closure_err` and return NaN;
/// the cell is cleared on entry and inspected afterwards.
///
/// # Errors
/// - The captured error, converted into `OptError`.
/// - `GradientDimMismatch` / `InvalidGradient` from validation.
///
/// # Examples
/// ```rust
/// # use std::cell::RefCell;
/// # use argmin::core::Error;
/// # use ndarray::array;
/// # use rust_hurwitz::optimization::loglik_optimizer::{Theta, finite_diff::run_fd_diff};
/// let closure_err: RefCell<Option<Error>> = RefCell::new(None);
/// let f = |x: &Theta| x.dot(x);
///
/// let grad = run_fd_diff(&array![0.0, 1.0], &f, &closure_err).unwrap();
/// assert_eq!(grad.len(), 2);
/// ```
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let grad = theta.forward_diff(func);
    match closure_err.take() {
        Some(err) => Err(err.into()),
        None => validate_grad(&grad, theta.len()).map(|()| grad),
    }
}

/// Finite-difference Hessian of the gradient function `f` at `theta`.
///
/// A central-difference Jacobian is tried first; if it fails validation the
/// forward-difference Jacobian is used instead and only its validation error
/// is reported. The accepted matrix is returned as `(J + Jᵀ)/2`.
///
/// # Errors
/// - `HessianDimMismatch` / `InvalidHessian` when the forward-difference
///   fallback also fails validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let central = theta.central_hessian(f);
    let jacobian = if validate_hessian(&central, dim).is_ok() {
        central
    } else {
        let forward = theta.forward_hessian(f);
        validate_hessian(&forward, dim)?;
        forward
    };
    Ok(symmetrized(&jacobian))
}

// ---- Helper methods ----

/// `(J + Jᵀ)/2`; the diagonal is reproduced exactly.
fn symmetrized(jacobian: &Hessian) -> Hessian {
    (jacobian + &jacobian.t()) * 0.5
}

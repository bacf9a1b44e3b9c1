//! Errors for the checked Hurwitz zeta evaluators.
//!
//! The unchecked evaluators (`hurwitz_zeta`, `hurwitz_zeta_prime`) never
//! return errors; domain violations there propagate as NaN/Inf or as a
//! meaningless finite value. The checked evaluators surface the same
//! situations as a [`ZetaError`] instead.
//!
//! ## Conventions
//! - `s` is the exponent and `a` the shift of ζ(s, a).
//! - The convergent domain of the integral representation is `s > 1`,
//!   `a > 0`; both must also be finite.
//! - Tape misuse from the autodiff overload is wrapped as [`ZetaError::Tape`].
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::autodiff::errors::TapeError;

/// Result alias for Hurwitz zeta evaluations that may produce [`ZetaError`].
pub type ZetaResult<T> = Result<T, ZetaError>;

/// Error type for Hurwitz zeta evaluation and its configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ZetaError {
    // ---- Domain ----
    /// Exponent must be finite and > 1.
    InvalidS { s: f64, reason: &'static str },

    /// Shift must be finite and > 0.
    InvalidA { a: f64, reason: &'static str },

    // ---- Evaluation ----
    /// Quadrature produced a non-finite value.
    NonFiniteResult { s: f64, a: f64, value: f64 },

    /// Refinement stopped short with an error estimate no smaller than the
    /// value itself.
    Unresolved { s: f64, a: f64, value: f64, error: f64 },

    // ---- Options ----
    /// Quadrature tolerance must be finite and > 0.
    InvalidTolerance { tol: f64, reason: &'static str },

    /// Refinement levels must satisfy 1 <= min_levels <= max_levels <= MAX_LEVELS.
    InvalidLevels { min_levels: usize, max_levels: usize, reason: &'static str },

    // ---- Autodiff ----
    /// Error raised by the differentiation tape.
    Tape(TapeError),
}

impl std::error::Error for ZetaError {}

impl std::fmt::Display for ZetaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Domain ----
            ZetaError::InvalidS { s, reason } => {
                write!(f, "Invalid zeta exponent s = {s}: {reason}")
            }
            ZetaError::InvalidA { a, reason } => {
                write!(f, "Invalid zeta shift a = {a}: {reason}")
            }

            // ---- Evaluation ----
            ZetaError::NonFiniteResult { s, a, value } => {
                write!(f, "Hurwitz zeta evaluation at (s = {s}, a = {a}) is non-finite: {value}")
            }
            ZetaError::Unresolved { s, a, value, error } => write!(
                f,
                "Hurwitz zeta evaluation at (s = {s}, a = {a}) did not converge: \
                 value {value:e} with error estimate {error:e}"
            ),

            // ---- Options ----
            ZetaError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid quadrature tolerance {tol}: {reason}")
            }
            ZetaError::InvalidLevels { min_levels, max_levels, reason } => {
                write!(
                    f,
                    "Invalid refinement levels (min = {min_levels}, max = {max_levels}): {reason}"
                )
            }

            // ---- Autodiff ----
            ZetaError::Tape(err) => write!(f, "Tape error: {err}"),
        }
    }
}

impl From<TapeError> for ZetaError {
    fn from(err: TapeError) -> Self {
        ZetaError::Tape(err)
    }
}

/// Convert a [`ZetaError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ZetaError> for PyErr {
    fn from(err: ZetaError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

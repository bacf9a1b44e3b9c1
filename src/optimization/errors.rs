//! optimization::errors — unified error surface for the MLE stack.
//!
//! Solver configuration problems, non-finite objective values, Argmin backend
//! failures and model-side evaluation failures (Hurwitz zeta domain errors,
//! tape misuse, invalid power-law exponents) all surface as [`OptError`].
use argmin::core::{ArgminError, Error};

use crate::{
    autodiff::errors::TapeError, powerlaw::errors::PowerLawError, special::errors::ZetaError,
};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost { tol: f64, reason: &'static str },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,
    /// Invalid line searcher name.
    InvalidLineSearch { name: String, reason: &'static str },
    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost { value: f64 },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },
    /// Theta hat is missing
    MissingThetaHat,
    /// The solver stopped on an internal failure, e.g. a line search that
    /// met a non-finite cost.
    SolverExit { text: String },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types
    BackendError { text: String },

    // ---- Finite Diffs ----
    /// Hessian matrix dimensions do not match parameter dimensions.
    HessianDimMismatch { expected: usize, found: (usize, usize) },
    /// Hessian values need to be finite.
    InvalidHessian { row: usize, col: usize, value: f64 },

    // ---- Zeta Errors ----
    /// Hurwitz zeta exponent outside `s > 1`.
    InvalidExponent { value: f64 },
    /// Hurwitz zeta shift outside `a > 0`.
    InvalidShift { value: f64 },
    /// Hurwitz zeta quadrature produced NaN/Inf.
    NonFiniteZeta { s: f64, a: f64, value: f64 },
    /// Hurwitz zeta quadrature did not resolve a single significant digit.
    UnresolvedZeta { s: f64, a: f64, error: f64 },

    // ---- Tape Errors ----
    /// Misuse of the reverse-mode tape while evaluating a gradient.
    Tape(TapeError),

    // ---- Power-law Errors ----
    /// Unconstrained optimizer input must be finite.
    InvalidThetaInput { index: usize, value: f64 },
    /// Power-law exponent must be finite and > 1.
    InvalidAlpha { value: f64 },
    /// Observations or model configuration rejected by the model.
    InvalidModelInput { text: String },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => write!(f, "No tolerances provided"),
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => write!(f, "Non-finite cost value: {value}"),

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => write!(f, "Missing estimated parameters (theta hat)"),
            OptError::SolverExit { text } => write!(f, "Solver exited early: {text}"),

            // ---- Argmin ----
            OptError::InvalidParameter { text } => write!(f, "Invalid parameter: {text}"),
            OptError::NotImplemented { text } => write!(f, "Not implemented: {text}"),
            OptError::NotInitialized { text } => write!(f, "Not initialized: {text}"),
            OptError::ConditionViolated { text } => write!(f, "Condition violated: {text}"),
            OptError::CheckPointNotFound { text } => write!(f, "Checkpoint not found: {text}"),
            OptError::PotentialBug { text } => write!(f, "Potential bug: {text}"),
            OptError::ImpossibleError { text } => write!(f, "Impossible error: {text}"),
            OptError::BackendError { text } => write!(f, "Backend error: {text}"),

            // ---- Finite Diffs ----
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- Zeta Errors ----
            OptError::InvalidExponent { value } => {
                write!(f, "Invalid zeta exponent {value}, must be finite and > 1")
            }
            OptError::InvalidShift { value } => {
                write!(f, "Invalid zeta shift {value}, must be finite and > 0")
            }
            OptError::NonFiniteZeta { s, a, value } => {
                write!(f, "Hurwitz zeta at s = {s}, a = {a} is not finite: {value}")
            }
            OptError::UnresolvedZeta { s, a, error } => {
                write!(f, "Hurwitz zeta at s = {s}, a = {a} is unresolved (error {error:e})")
            }

            // ---- Tape Errors ----
            OptError::Tape(err) => write!(f, "Tape error: {err}"),

            // ---- Power-law Errors ----
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::InvalidAlpha { value } => {
                write!(f, "Invalid power-law exponent {value}, must be finite and > 1")
            }
            OptError::InvalidModelInput { text } => write!(f, "Invalid model input: {text}"),

            // ---- Fallback ----
            OptError::UnknownError => write!(f, "Unknown error"),
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => match err.downcast::<OptError>() {
                Ok(opt_err) => opt_err,
                Err(err) => OptError::BackendError { text: err.to_string() },
            },
        }
    }
}

impl From<ZetaError> for OptError {
    fn from(err: ZetaError) -> Self {
        match err {
            ZetaError::InvalidS { s, .. } => OptError::InvalidExponent { value: s },
            ZetaError::InvalidA { a, .. } => OptError::InvalidShift { value: a },
            ZetaError::NonFiniteResult { s, a, value } => OptError::NonFiniteZeta { s, a, value },
            ZetaError::Unresolved { s, a, error, .. } => OptError::UnresolvedZeta { s, a, error },
            ZetaError::Tape(err) => OptError::Tape(err),
            _ => OptError::UnknownError,
        }
    }
}

impl From<TapeError> for OptError {
    fn from(err: TapeError) -> Self {
        OptError::Tape(err)
    }
}

impl From<PowerLawError> for OptError {
    fn from(err: PowerLawError) -> Self {
        match err {
            PowerLawError::InvalidAlpha { value } => OptError::InvalidAlpha { value },
            PowerLawError::InvalidTheta { value } => {
                OptError::InvalidThetaInput { index: 0, value }
            }
            PowerLawError::Zeta(err) => err.into(),
            PowerLawError::Tape(err) => OptError::Tape(err),
            PowerLawError::Opt(err) => err,
            other => OptError::InvalidModelInput { text: other.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Model-side failures raised inside a log-likelihood must keep their
    // payload when they cross into the optimizer error surface.
    //
    // Given
    // -----
    // - A zeta domain error, a non-finite zeta result and a tape error.
    //
    // Expect
    // ------
    // - `InvalidExponent`, `NonFiniteZeta` and `Tape` with the same fields.
    fn zeta_and_tape_errors_map_to_opt_variants() {
        let bad_s = ZetaError::InvalidS { s: 0.5, reason: "test" };
        assert_eq!(OptError::from(bad_s), OptError::InvalidExponent { value: 0.5 });

        let non_finite = ZetaError::NonFiniteResult { s: 2.0, a: 1.0, value: f64::INFINITY };
        assert_eq!(
            OptError::from(non_finite),
            OptError::NonFiniteZeta { s: 2.0, a: 1.0, value: f64::INFINITY }
        );

        let tape = TapeError::IndexOutOfRange { index: 3, len: 1 };
        assert_eq!(OptError::from(tape.clone()), OptError::Tape(tape));
    }

    #[test]
    // Purpose
    // -------
    // An `OptError` boxed into an Argmin error (as the adapter does) must come
    // back out unchanged instead of degrading to `BackendError`.
    //
    // Given
    // -----
    // - `OptError::NonFiniteCost` converted into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - Converting back yields the original variant.
    fn opt_error_round_trips_through_argmin_error() {
        // Arrange
        let original = OptError::NonFiniteCost { value: f64::NEG_INFINITY };
        let boxed: Error = original.clone().into();

        // Act
        let back = OptError::from(boxed);

        // Assert
        assert_eq!(back, original);
    }
}

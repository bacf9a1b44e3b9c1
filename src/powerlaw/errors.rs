//! Errors for the discrete power-law model.
//!
//! Data validation, model configuration, evaluation failures in ζ or on the
//! tape, and optimizer failures during a fit are all reported as
//! [`PowerLawError`]. Inside the optimizer the same failures travel as
//! `OptError` and come back through `From<OptError>`.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{
    autodiff::errors::TapeError, optimization::errors::OptError, special::errors::ZetaError,
};

/// Result alias for power-law operations that may produce [`PowerLawError`].
pub type PowerLawResult<T> = Result<T, PowerLawError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PowerLawError {
    // ---- Data ----
    /// No observations were supplied.
    EmptyData,

    /// `values` and `frequencies` differ in length.
    LengthMismatch { values: usize, frequencies: usize },

    /// Observed values must be positive integers.
    InvalidValue { index: usize, value: u64 },

    /// Each value may appear only once in tallied data.
    DuplicateValue { value: u64 },

    /// All frequencies are zero.
    ZeroTotal,

    /// The frequencies sum past `u64::MAX`.
    TotalOverflow,

    /// An observation lies below the model's lower cutoff.
    BelowCutoff { value: u64, y_min: u64 },

    // ---- Model ----
    /// Lower cutoff must be at least 1.
    InvalidYMin { y_min: u64 },

    /// Exponent must be finite and > 1.
    InvalidAlpha { value: f64 },

    /// Unconstrained optimizer coordinate must be finite.
    InvalidTheta { value: f64 },

    /// The optimizer vector must hold exactly one coordinate.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Gamma prior parameters must be finite and > 0.
    InvalidPrior { shape: f64, rate: f64, reason: &'static str },

    /// Fit results were requested before a successful fit.
    ModelNotFitted,

    // ---- Evaluation ----
    Zeta(ZetaError),
    Tape(TapeError),
    Opt(OptError),
}

impl std::error::Error for PowerLawError {}

impl std::fmt::Display for PowerLawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Data ----
            PowerLawError::EmptyData => write!(f, "No observations supplied"),
            PowerLawError::LengthMismatch { values, frequencies } => write!(
                f,
                "Length mismatch: {values} values but {frequencies} frequencies"
            ),
            PowerLawError::InvalidValue { index, value } => {
                write!(f, "Invalid value at index {index}: {value}, must be >= 1")
            }
            PowerLawError::DuplicateValue { value } => {
                write!(f, "Value {value} appears more than once")
            }
            PowerLawError::ZeroTotal => write!(f, "All frequencies are zero"),
            PowerLawError::TotalOverflow => write!(f, "Sum of frequencies overflows u64"),
            PowerLawError::BelowCutoff { value, y_min } => {
                write!(f, "Observation {value} lies below the lower cutoff y_min = {y_min}")
            }

            // ---- Model ----
            PowerLawError::InvalidYMin { y_min } => {
                write!(f, "Invalid lower cutoff {y_min}, must be >= 1")
            }
            PowerLawError::InvalidAlpha { value } => {
                write!(f, "Invalid exponent alpha = {value}, must be finite and > 1")
            }
            PowerLawError::InvalidTheta { value } => {
                write!(f, "Invalid unconstrained parameter {value}, must be finite")
            }
            PowerLawError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            PowerLawError::InvalidPrior { shape, rate, reason } => {
                write!(f, "Invalid Gamma prior (shape = {shape}, rate = {rate}): {reason}")
            }

            PowerLawError::ModelNotFitted => write!(f, "Model has not been fitted"),

            // ---- Evaluation ----
            PowerLawError::Zeta(err) => write!(f, "Zeta error: {err}"),
            PowerLawError::Tape(err) => write!(f, "Tape error: {err}"),
            PowerLawError::Opt(err) => write!(f, "Optimization error: {err}"),
        }
    }
}

impl From<ZetaError> for PowerLawError {
    fn from(err: ZetaError) -> Self {
        PowerLawError::Zeta(err)
    }
}

impl From<TapeError> for PowerLawError {
    fn from(err: TapeError) -> Self {
        PowerLawError::Tape(err)
    }
}

impl From<OptError> for PowerLawError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::InvalidAlpha { value } => PowerLawError::InvalidAlpha { value },
            OptError::InvalidThetaInput { value, .. } => PowerLawError::InvalidTheta { value },
            OptError::Tape(err) => PowerLawError::Tape(err),
            other => PowerLawError::Opt(other),
        }
    }
}

/// Convert a [`PowerLawError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<PowerLawError> for PyErr {
    fn from(err: PowerLawError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

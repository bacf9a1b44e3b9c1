//! Errors for the reverse-mode differentiation tape.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for tape operations that may produce [`TapeError`].
pub type TapeResult<T> = Result<T, TapeError>;

/// Misuse of a [`Tape`](crate::autodiff::tape::Tape).
///
/// Every [`Var`](crate::autodiff::tape::Var) remembers the id of the tape that
/// created it. Mixing variables across tapes, or using a variable recorded
/// before [`Tape::clear`](crate::autodiff::tape::Tape::clear), is rejected
/// instead of silently reading another graph's nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapeError {
    /// Variable was recorded on a different (or since cleared) tape.
    ForeignVar { index: usize, tape_id: usize, expected: usize },

    /// Variable index lies outside the tape arena.
    IndexOutOfRange { index: usize, len: usize },
}

impl std::error::Error for TapeError {}

impl std::fmt::Display for TapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TapeError::ForeignVar { index, tape_id, expected } => write!(
                f,
                "Variable {index} belongs to tape {tape_id}, but was used on tape {expected}"
            ),
            TapeError::IndexOutOfRange { index, len } => {
                write!(f, "Variable index {index} out of range for tape of length {len}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<TapeError> for PyErr {
    fn from(err: TapeError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

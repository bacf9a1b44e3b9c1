//! powerlaw — discrete power-law (generalized Zipf) model on count data.
//!
//! Purpose
//! -------
//! Fit `P(Y = k) ∝ k^(−α)`, `k ≥ y_min`, to tallied integer data. This is the
//! main consumer of the Hurwitz zeta machinery: ζ(α, y_min) normalizes the
//! law, and its α-derivative, recorded on a [`Tape`](crate::autodiff::Tape),
//! drives the score used by L-BFGS.
//!
//! Key behaviors
//! -------------
//! - [`PowerLawData`]: validated `(values, frequencies)` with precomputed
//!   sufficient statistics.
//! - [`DiscretePowerLaw`]: pmf, survival function, log-likelihood, score,
//!   observed information and [`DiscretePowerLaw::fit`].
//! - [`PowerLawOptions`] / [`AlphaPrior`]: optimizer and quadrature settings
//!   plus an optional Gamma prior for MAP estimation.
//!
//! Conventions
//! -----------
//! - The exponent is optimized as `θ` with `α = 1 + softplus(θ)`; see
//!   [`alpha_from_theta`] / [`theta_from_alpha`].
//! - Errors are [`PowerLawError`]; optimizer and zeta failures are wrapped.

pub mod data;
pub mod errors;
pub mod model;
pub mod options;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::PowerLawData;
pub use self::errors::{PowerLawError, PowerLawResult};
pub use self::model::{DiscretePowerLaw, PowerLawFit, alpha_from_theta, theta_from_alpha};
pub use self::options::{AlphaPrior, DEFAULT_ALPHA0, PowerLawOptions};

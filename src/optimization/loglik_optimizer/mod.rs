//! loglik_optimizer — Argmin-backed log-likelihood maximizer.
//!
//! Purpose
//! -------
//! Turn a model's log-likelihood into an L-BFGS run. Callers implement
//! [`LogLikelihood`] and call [`maximize`]; the module handles the sign flip
//! to a cost, solver construction, finite-difference fallbacks and outcome
//! validation.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] exposes `c(θ) = −ℓ(θ)` and `∇c = −∇ℓ` to
//!   Argmin, finite-differencing the cost when no analytic gradient exists.
//! - [`builders`] constructs L-BFGS with Hager–Zhang or More–Thuente line
//!   search and applies tolerances.
//! - [`maximize`] runs the solver and validates the result into an
//!   [`OptimOutcome`].
//! - [`finite_diff`] supplies gradient and Hessian approximations; the
//!   power-law model uses [`finite_diff::compute_hessian`] on its analytic
//!   gradient for the observed information.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`LogLikelihood::value`] and [`LogLikelihood::grad`] return recoverable
//!   [`OptError`]s for invalid inputs.
//! - [`Tolerances`] and [`MLEOptions`] are validated on construction.
//!
//! Conventions
//! -----------
//! - Parameters are [`Theta`] (`Array1<f64>`), gradients [`Grad`], Hessians
//!   [`types::Hessian`].
//! - [`OptimOutcome::value`] is `ℓ(θ̂)`, not the cost.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}

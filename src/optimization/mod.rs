//! optimization — MLE stack, stable transforms, and unified error surface.
//!
//! Purpose
//! -------
//! Fit models by maximizing a log-likelihood `ℓ(θ)` with Argmin's L-BFGS,
//! without exposing solver generics to model code. The power-law model in
//! [`crate::powerlaw`] is the primary client.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: [`LogLikelihood`](loglik_optimizer::LogLikelihood)
//!   trait, [`maximize`](loglik_optimizer::maximize), solver configuration,
//!   finite-difference gradient fallback and Hessians.
//! - `numerical_stability`: softplus-family transforms for mapping an
//!   unconstrained `θ` onto constrained parameters.
//! - `errors`: [`OptError`](errors::OptError) / `OptResult<T>`, including
//!   conversions from zeta, tape and power-law errors raised inside a
//!   log-likelihood.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers work in unconstrained θ-space. Constraint handling lives in
//!   the model layer.
//! - Invalid states are reported as `OptError`, never as panics.
//!
//! Conventions
//! -----------
//! - Solvers minimize the cost `c(θ) = −ℓ(θ)`; every user-facing value is
//!   expressed in terms of `ℓ`.
//! - The only logging is the optional Argmin slog observer (feature
//!   `obs_slog`, enabled per run through `MLEOptions::verbose`).
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; the end-to-end power-law fit
//!   in `tests/` exercises `maximize` with analytic gradients.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_hurwitz::optimization::prelude::*;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}

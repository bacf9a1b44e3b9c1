//! numerical_stability — overflow-safe scalar transforms for reparameterization.
//!
//! Purpose
//! -------
//! Map the unconstrained optimizer coordinate `θ ∈ ℝ` onto constrained model
//! parameters (for the power law, `α = 1 + softplus(θ) > 1`) and back, and
//! supply the matching Jacobian factor for the chain rule.
//!
//! Key behaviors
//! -------------
//! - `safe_softplus`: ℝ → (0, ∞) without overflow.
//! - `safe_softplus_inv`: (0, ∞) → ℝ without cancellation.
//! - `safe_logistic`: derivative of softplus, ℝ → (0, 1) without overflow.
//!
//! Conventions
//! -----------
//! - Pure functions of finite `f64` inputs; no logging, no global state.
//! - Domain checks (e.g. `x > 0` for the inverse) belong to callers.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{SOFTPLUS_CUTOFF, safe_logistic, safe_softplus, safe_softplus_inv};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{safe_logistic, safe_softplus, safe_softplus_inv};
}

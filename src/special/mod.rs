//! special — Hurwitz zeta function and the quadrature machinery behind it.
//!
//! Purpose
//! -------
//! Evaluate ζ(s, a) and ∂ζ/∂s from the integral representation using
//! exp-sinh quadrature, and expose a gradient-aware overload that records
//! its result on an explicit reverse-mode [`Tape`](crate::autodiff::Tape).
//!
//! Key behaviors
//! -------------
//! - [`hurwitz`]: unchecked evaluators (no validation), checked evaluators
//!   with diagnostics, and the autodiff overloads.
//! - [`quadrature`]: stateless exp-sinh integrator on `(0, ∞)`.
//! - [`guards`]: integrand wrapper clamping non-finite samples to zero.
//! - [`options`]: validated quadrature configuration.
//! - [`errors`]: `ZetaError` / `ZetaResult`.
//!
//! Downstream usage
//! ----------------
//! - `powerlaw` normalizes the discrete power law with ln ζ(α, y_min) and
//!   differentiates it through [`ln_hurwitz_zeta_var_checked`].

pub mod errors;
pub mod guards;
pub mod hurwitz;
pub mod options;
pub mod quadrature;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ZetaError, ZetaResult};
pub use self::hurwitz::{
    hurwitz_zeta, hurwitz_zeta_checked, hurwitz_zeta_prime, hurwitz_zeta_prime_checked,
    hurwitz_zeta_var, hurwitz_zeta_var_checked, ln_hurwitz_zeta_checked,
    ln_hurwitz_zeta_var_checked, ZetaOutcome, ZetaStatus,
};
pub use self::options::ZetaOptions;

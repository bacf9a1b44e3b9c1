//! Quadrature configuration for Hurwitz zeta evaluation.
//!
//! - [`ZetaOptions`] bundles the termination tolerance and the refinement
//!   level bounds of the exp-sinh integrator.
//!
//! Notes
//! -----
//! - `ZetaOptions::default()` reproduces the unchecked evaluators exactly:
//!   tolerance `√ε`, at least 4 and at most 9 refinement levels.
use crate::special::errors::{ZetaError, ZetaResult};

/// Hard cap on refinement levels; level `k` uses step `2^-k`.
pub const MAX_LEVELS: usize = 20;

/// Default minimum number of refinement levels before the error test applies.
pub const DEFAULT_MIN_LEVELS: usize = 4;

/// Default maximum number of refinement levels.
pub const DEFAULT_MAX_LEVELS: usize = 9;

/// Default termination tolerance, `√ε` for `f64` (≈ 1.49e-8).
pub fn default_tolerance() -> f64 {
    f64::EPSILON.sqrt()
}

/// Validated configuration for the exp-sinh quadrature used by ζ(s, a).
///
/// Fields
/// ------
/// - `tolerance`: stop once `|I_k − I_{k−1}| ≤ tolerance · L1`.
/// - `min_levels`: refinements always performed before testing convergence.
/// - `max_levels`: refinements after which the result is returned as-is.
///
/// Invariants
/// ----------
/// - `tolerance` is finite and strictly positive.
/// - `1 ≤ min_levels ≤ max_levels ≤ MAX_LEVELS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZetaOptions {
    pub tolerance: f64,
    pub min_levels: usize,
    pub max_levels: usize,
}

impl ZetaOptions {
    /// Construct validated quadrature options.
    ///
    /// # Errors
    /// - [`ZetaError::InvalidTolerance`] for a non-finite or non-positive tolerance.
    /// - [`ZetaError::InvalidLevels`] when the level bounds are out of order or
    ///   outside `1..=MAX_LEVELS`.
    pub fn new(tolerance: f64, min_levels: usize, max_levels: usize) -> ZetaResult<Self> {
        if !tolerance.is_finite() {
            return Err(ZetaError::InvalidTolerance {
                tol: tolerance,
                reason: "Tolerance must be finite.",
            });
        }
        if tolerance <= 0.0 {
            return Err(ZetaError::InvalidTolerance {
                tol: tolerance,
                reason: "Tolerance must be positive.",
            });
        }
        if min_levels == 0 {
            return Err(ZetaError::InvalidLevels {
                min_levels,
                max_levels,
                reason: "At least one refinement level is required.",
            });
        }
        if min_levels > max_levels {
            return Err(ZetaError::InvalidLevels {
                min_levels,
                max_levels,
                reason: "min_levels must not exceed max_levels.",
            });
        }
        if max_levels > MAX_LEVELS {
            return Err(ZetaError::InvalidLevels {
                min_levels,
                max_levels,
                reason: "max_levels exceeds the supported maximum of 20.",
            });
        }
        Ok(Self { tolerance, min_levels, max_levels })
    }
}

impl Default for ZetaOptions {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            min_levels: DEFAULT_MIN_LEVELS,
            max_levels: DEFAULT_MAX_LEVELS,
        }
    }
}

//! loglik_optimizer::builders — L-BFGS solver construction.
//!
//! [`build_lbfgs`] wraps any line search in an L-BFGS solver with the memory
//! and optional gradient/cost tolerances of [`MLEOptions`]. The initial point
//! and the iteration cap belong to the executor and are applied by
//! [`maximize`](super::maximize).
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{Cost, DEFAULT_LBFGS_MEM, Grad, Theta},
    },
};

/// L-BFGS over `line_search` configured from `opts`.
///
/// `None` tolerances keep Argmin's default for that stopping rule.
///
/// # Errors
/// Argmin rejecting a tolerance, surfaced as `OptError`.
pub fn build_lbfgs<L>(line_search: L, opts: &MLEOptions) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    let solver = LBFGS::new(line_search, opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM));
    let solver = match opts.tols.tol_grad {
        Some(tol) => solver.with_tolerance_grad(tol)?,
        None => solver,
    };
    let solver = match opts.tols.tol_cost {
        Some(tol) => solver.with_tolerance_cost(tol)?,
        None => solver,
    };
    Ok(solver)
}

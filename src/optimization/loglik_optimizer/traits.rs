//! Public configuration and model interface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: implemented by models (e.g. the discrete power law).
//! - [`MLEOptions`] and [`Tolerances`]: validated optimizer configuration.
//! - [`LineSearcher`]: line search used inside L-BFGS.
//! - [`OptimOutcome`]: normalized result of [`maximize`](super::maximize).
//!
//! Convention: `ℓ(θ)` is maximized by minimizing `c(θ) = −ℓ(θ)`. An analytic
//! gradient, when provided, is `∇ℓ(θ)`; the adapter flips the sign.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Model interface for the optimizer.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject an invalid starting
///   point or payload once, before the solver runs.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic `∇ℓ(θ)`. The default
///   returns [`OptError::GradientNotImplemented`], which switches the adapter
///   to finite differences.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used inside the L-BFGS solver.
///
/// Parses case-insensitively from `"MoreThuente"` / `"HagerZhang"`; any
/// other name is [`OptError::InvalidLineSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields
/// ------
/// - `tols`: stopping rules.
/// - `line_searcher`: line search inside L-BFGS.
/// - `verbose`: attach the slog observer (only with feature `obs_slog`).
/// - `lbfgs_mem`: history size; `None` uses [`DEFAULT_LBFGS_MEM`](super::DEFAULT_LBFGS_MEM).
///
/// Default: `tol_grad = 1e-6`, no cost tolerance, `max_iter = 300`,
/// More–Thuente, quiet, default memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Create optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] for `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Stopping rules; at least one must be set.
///
/// - `tol_grad`: stop when `‖∇c‖` falls below this threshold.
/// - `tol_cost`: stop when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Result returned by [`maximize`](super::maximize).
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best log-likelihood `ℓ(θ̂)`.
/// - `converged`: the solver met its convergence criterion or target cost.
///   Reaching the iteration cap or an early solver exit (a failed line
///   search) terminates the run without converging.
/// - `status`: that status as text.
/// - `iterations`, `fn_evals`: Argmin counters.
/// - `grad_norm`: norm of the last available cost gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated outcome from raw solver state.
    ///
    /// # Errors
    /// - [`OptError::MissingThetaHat`] / [`OptError::InvalidThetaHat`] for a
    ///   missing or non-finite estimate.
    /// - [`OptError::NonFiniteCost`] for a non-finite value.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        );
        let status = match termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Line-search names parse case-insensitively and unknown names fail.
    //
    // Given
    // -----
    // - "hagerzhang", "MORETHUENTE", "bisection".
    //
    // Expect
    // ------
    // - The two known names parse; the third is `InvalidLineSearch`.
    fn line_searcher_parses_case_insensitively() {
        assert_eq!("hagerzhang".parse::<LineSearcher>().unwrap(), LineSearcher::HagerZhang);
        assert_eq!("MORETHUENTE".parse::<LineSearcher>().unwrap(), LineSearcher::MoreThuente);
        let err = "bisection".parse::<LineSearcher>().unwrap_err();
        assert!(matches!(err, OptError::InvalidLineSearch { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Tolerances and options reject empty or invalid configurations.
    //
    // Given
    // -----
    // - All-`None` tolerances, a negative gradient tolerance, zero
    //   iterations, zero L-BFGS memory.
    //
    // Expect
    // ------
    // - The matching `OptError` variant for each.
    fn configuration_is_validated() {
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(
            Tolerances::new(Some(-1.0), None, None),
            Err(OptError::InvalidTolGrad { .. })
        ));
        assert!(matches!(
            Tolerances::new(None, None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));
        let tols = Tolerances::new(Some(1e-6), None, None).unwrap();
        assert!(matches!(
            MLEOptions::new(tols, LineSearcher::MoreThuente, false, Some(0)),
            Err(OptError::InvalidLBFGSMem { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Outcome construction maps termination status and validates estimates.
    //
    // Given
    // -----
    // - A solver-converged status with θ̂ = [0.5] and gradient [3, 4].
    // - A missing θ̂.
    //
    // Expect
    // ------
    // - converged = true, grad_norm = 5; missing θ̂ is `MissingThetaHat`.
    fn outcome_maps_status_and_validates() {
        let out = OptimOutcome::new(
            Some(array![0.5]),
            -1.25,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
            Some(array![3.0, 4.0]),
        )
        .unwrap();
        assert!(out.converged);
        assert_eq!(out.iterations, 12);
        assert_eq!(out.grad_norm, Some(5.0));

        let err = OptimOutcome::new(
            None,
            0.0,
            TerminationStatus::NotTerminated,
            0,
            FnEvalMap::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, OptError::MissingThetaHat);
    }

    #[test]
    // Purpose
    // -------
    // Only genuine convergence counts as converged.
    //
    // Given
    // -----
    // - `MaxItersReached` and `SolverExit("Line search terminated ...")`.
    //
    // Expect
    // ------
    // - converged = false for both, with the reason kept in `status`.
    fn iteration_cap_and_solver_exit_are_not_convergence() {
        let message = "Line search terminated with: 'Non-finite cost value: inf'".to_string();
        let reasons = [
            TerminationReason::MaxItersReached,
            TerminationReason::SolverExit(message.clone()),
        ];
        for reason in reasons {
            let out = OptimOutcome::new(
                Some(array![0.5]),
                -1.25,
                TerminationStatus::Terminated(reason),
                3,
                FnEvalMap::new(),
                None,
            )
            .unwrap();
            assert!(!out.converged, "status = {}", out.status);
        }

        let exited = OptimOutcome::new(
            Some(array![0.5]),
            -1.25,
            TerminationStatus::Terminated(TerminationReason::SolverExit(message)),
            3,
            FnEvalMap::new(),
            None,
        )
        .unwrap();
        assert!(exited.status.contains("Non-finite cost"));
    }
}

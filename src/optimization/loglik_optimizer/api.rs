//! Entry point for maximizing a `LogLikelihood`, and the executor loop that
//! drives the selected L-BFGS variant.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, Grad, OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::build_lbfgs,
        types::{HagerZhangLS, MoreThuenteLS},
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};
use argmin::core::{Executor, IterState, Solver, State, TerminationReason, TerminationStatus};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient, observers::ObserverMode};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;
#[cfg(feature = "obs_slog")]
use argmin_observer_slog::SlogLogger;

type SolverState = IterState<Theta, Grad, (), (), (), Cost>;

/// Maximize a log-likelihood `ℓ(θ)` using L-BFGS with the chosen line search.
///
/// Validates `theta0` with [`LogLikelihood::check`], wraps `(f, data)` in an
/// [`ArgMinAdapter`] (which minimizes `−ℓ`), builds the solver selected by
/// `opts.line_searcher` and runs it from `theta0`, capped at
/// `opts.tols.max_iter` iterations. With the `obs_slog` feature and
/// `opts.verbose`, the starting point is reported on stderr and every
/// iteration is logged through a terminal slog observer.
///
/// # Errors
/// - Anything returned by `f.check`.
/// - Solver construction and runtime failures, including model errors raised
///   inside `value`/`grad` during the run.
/// - [`OptError::SolverExit`](crate::optimization::errors::OptError::SolverExit)
///   when the solver aborted (e.g. a line search that met a non-finite cost)
///   before moving away from `theta0`. An abort after progress is returned as
///   an outcome with `converged = false`.
/// - Validation failures on the final estimate.
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use rust_hurwitz::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{maximize, LogLikelihood, MLEOptions, Theta},
/// };
///
/// struct Quadratic;
/// impl LogLikelihood for Quadratic {
///     type Data = f64;
///     fn value(&self, theta: &Theta, center: &f64) -> OptResult<f64> {
///         Ok(-(theta[0] - center).powi(2))
///     }
///     fn check(&self, _: &Theta, _: &f64) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Quadratic, array![0.0], &1.5, &MLEOptions::default()).unwrap();
/// assert!((out.theta_hat[0] - 1.5).abs() < 1e-4);
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        report_start(&theta0, &problem)?;
    }
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            execute(problem, build_lbfgs(MoreThuenteLS::new(), opts)?, theta0, opts)
        }
        LineSearcher::HagerZhang => {
            execute(problem, build_lbfgs(HagerZhangLS::new(), opts)?, theta0, opts)
        }
    }
}

// ---- Helper methods ----

/// Run `solver` to termination and convert its best state, mapping the cost
/// back to `ℓ = −c`. An aborted run that never left `theta0` is an error.
fn execute<'a, F, S>(
    problem: ArgMinAdapter<'a, F>, solver: S, theta0: Theta, opts: &MLEOptions,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, SolverState> + Send + 'static,
{
    let max_iters = opts.tols.max_iter.map(|m| m as u64);
    let start = theta0.clone();
    let executor = Executor::new(problem, solver).configure(|state| {
        let state = state.param(theta0);
        match max_iters {
            Some(m) => state.max_iters(m),
            None => state,
        }
    });
    #[cfg(feature = "obs_slog")]
    let executor = if opts.verbose {
        executor.add_observer(SlogLogger::term_noblock(), ObserverMode::Always)
    } else {
        executor
    };

    let result = executor.run()?;
    let mut state = result.state().clone();
    let termination = state.get_termination_status().clone();
    if let TerminationStatus::Terminated(TerminationReason::SolverExit(text)) = &termination {
        if state.get_best_param().map_or(true, |best| *best == start) {
            return Err(OptError::SolverExit { text: text.clone() });
        }
    }
    let evals = state.get_func_counts().clone();
    let iterations = state.get_iter();
    let ll_hat = -state.get_best_cost();
    OptimOutcome::new(
        state.take_best_param(),
        ll_hat,
        termination,
        iterations,
        evals,
        state.take_gradient(),
    )
}

#[cfg(feature = "obs_slog")]
fn report_start<F: LogLikelihood>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()> {
    let ll0 = -problem.cost(theta0)?;
    match problem.gradient(theta0) {
        Ok(g) => eprintln!("start: theta = {theta0}, ell = {ll0:.6}, |grad| = {:.3e}", g.l2_norm()),
        Err(_) => eprintln!("start: theta = {theta0}, ell = {ll0:.6}"),
    }
    Ok(())
}

//! rust_hurwitz — Hurwitz zeta function, its s-derivative and a discrete
//! power-law model, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the zeta evaluators and the power-law fit to Python via the
//! `_rust_hurwitz` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules:
//!   - `special`: ζ(s, a) and ∂ζ/∂s by exp-sinh quadrature, checked
//!     evaluators with diagnostics, and tape-aware overloads.
//!   - `autodiff`: the explicit reverse-mode tape those overloads record on.
//!   - `powerlaw`: the discrete power law normalized by ζ(α, y_min) and its
//!     maximum-likelihood / MAP fit.
//!   - `optimization`: the L-BFGS log-likelihood maximizer used by the fit.
//! - Define `#[pyclass]` / `#[pyfunction]` wrappers and the `#[pymodule]`
//!   initializer for `_rust_hurwitz`, registering the `special` and
//!   `powerlaw` submodules under `rust_hurwitz` for dot-notation imports.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work happens in the inner modules; this file performs
//!   only FFI glue, argument defaults and error mapping.
//! - Python entry points always use the checked evaluators, so invalid
//!   `(s, a)` raise `ValueError` instead of returning NaN.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are converted to `PyErr` at the boundary
//!   through their `From` impls.
//! - Native Rust users can ignore everything behind `python-bindings`.

pub mod autodiff;
pub mod optimization;
pub mod powerlaw;
pub mod special;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    powerlaw::{
        errors::PowerLawError,
        model::{DiscretePowerLaw as CoreDiscretePowerLaw, PowerLawFit},
    },
    special::hurwitz::{
        ZetaOutcome, ZetaStatus, hurwitz_zeta_checked, hurwitz_zeta_prime_checked,
    },
    utils::{build_powerlaw_options, extract_powerlaw_data, extract_zeta_opts},
};

/// Value and quadrature diagnostics of one checked evaluation.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_hurwitz.special", name = "ZetaOutcome")]
pub struct PyZetaOutcome {
    inner: ZetaOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyZetaOutcome {
    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    pub fn error(&self) -> f64 {
        self.inner.error
    }

    #[getter]
    pub fn l1_norm(&self) -> f64 {
        self.inner.l1_norm
    }

    #[getter]
    pub fn levels(&self) -> usize {
        self.inner.levels
    }

    #[getter]
    pub fn evaluations(&self) -> usize {
        self.inner.evaluations
    }

    #[getter]
    pub fn clamped(&self) -> usize {
        self.inner.clamped
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.status == ZetaStatus::Converged
    }

    fn __repr__(&self) -> String {
        format!(
            "ZetaOutcome(value={}, error={:e}, levels={}, converged={})",
            self.inner.value,
            self.inner.error,
            self.inner.levels,
            self.converged()
        )
    }
}

/// ζ(s, a) for `s > 1`, `a > 0`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "hurwitz_zeta")]
#[pyo3(
    signature = (s, a, tolerance = None, min_levels = None, max_levels = None),
    text_signature = "(s, a, /, tolerance=None, min_levels=None, max_levels=None)"
)]
pub fn py_hurwitz_zeta(
    s: f64, a: f64, tolerance: Option<f64>, min_levels: Option<usize>,
    max_levels: Option<usize>,
) -> PyResult<f64> {
    let opts = extract_zeta_opts(tolerance, min_levels, max_levels)?;
    Ok(hurwitz_zeta_checked(s, a, &opts)?.value)
}

/// ∂ζ(s, a)/∂s for `s > 1`, `a > 0`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "hurwitz_zeta_prime")]
#[pyo3(
    signature = (s, a, tolerance = None, min_levels = None, max_levels = None),
    text_signature = "(s, a, /, tolerance=None, min_levels=None, max_levels=None)"
)]
pub fn py_hurwitz_zeta_prime(
    s: f64, a: f64, tolerance: Option<f64>, min_levels: Option<usize>,
    max_levels: Option<usize>,
) -> PyResult<f64> {
    let opts = extract_zeta_opts(tolerance, min_levels, max_levels)?;
    Ok(hurwitz_zeta_prime_checked(s, a, &opts)?.value)
}

/// ζ(s, a), or ∂ζ/∂s with `derivative=True`, with full diagnostics.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "hurwitz_zeta_checked")]
#[pyo3(
    signature = (s, a, derivative = false, tolerance = None, min_levels = None, max_levels = None),
    text_signature = "(s, a, /, derivative=False, tolerance=None, min_levels=None, max_levels=None)"
)]
pub fn py_hurwitz_zeta_checked(
    s: f64, a: f64, derivative: bool, tolerance: Option<f64>, min_levels: Option<usize>,
    max_levels: Option<usize>,
) -> PyResult<PyZetaOutcome> {
    let opts = extract_zeta_opts(tolerance, min_levels, max_levels)?;
    let inner = if derivative {
        hurwitz_zeta_prime_checked(s, a, &opts)?
    } else {
        hurwitz_zeta_checked(s, a, &opts)?
    };
    Ok(PyZetaOutcome { inner })
}

/// Result of `DiscretePowerLaw.fit`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_hurwitz.powerlaw")]
pub struct PowerLawFitResult {
    inner: PowerLawFit,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PowerLawFitResult {
    #[getter]
    pub fn alpha(&self) -> f64 {
        self.inner.alpha
    }

    #[getter]
    pub fn std_error(&self) -> Option<f64> {
        self.inner.std_error
    }

    #[getter]
    pub fn log_likelihood(&self) -> f64 {
        self.inner.log_likelihood
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.outcome.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.outcome.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.outcome.iterations
    }

    #[getter]
    pub fn grad_norm(&self) -> Option<f64> {
        self.inner.outcome.grad_norm
    }

    fn __repr__(&self) -> String {
        format!(
            "PowerLawFitResult(alpha={}, std_error={:?}, log_likelihood={}, converged={})",
            self.inner.alpha,
            self.inner.std_error,
            self.inner.log_likelihood,
            self.inner.outcome.converged
        )
    }
}

/// Discrete power law `P(Y = k) = k^(−α) / ζ(α, y_min)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_hurwitz.powerlaw")]
pub struct DiscretePowerLaw {
    inner: CoreDiscretePowerLaw,
    results: Option<PowerLawFit>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl DiscretePowerLaw {
    #[new]
    #[pyo3(
        signature = (
            y_min = 1,
            alpha0 = None,
            prior = None,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            lbfgs_mem = None,
            verbose = None,
            zeta_tol = None,
            min_levels = None,
            max_levels = None,
        ),
        text_signature = "(y_min=1, /, alpha0=2.0, prior=None, tol_grad=None, tol_cost=None, \
                          max_iter=None, line_searcher='MoreThuente', lbfgs_mem=None, \
                          verbose=False, zeta_tol=None, min_levels=None, max_levels=None)"
    )]
    pub fn new(
        y_min: u64, alpha0: Option<f64>, prior: Option<(f64, f64)>, tol_grad: Option<f64>,
        tol_cost: Option<f64>, max_iter: Option<usize>, line_searcher: Option<&str>,
        lbfgs_mem: Option<usize>, verbose: Option<bool>, zeta_tol: Option<f64>,
        min_levels: Option<usize>, max_levels: Option<usize>,
    ) -> PyResult<Self> {
        let opts = build_powerlaw_options(
            alpha0,
            prior,
            tol_grad,
            tol_cost,
            max_iter,
            line_searcher,
            lbfgs_mem,
            verbose,
            zeta_tol,
            min_levels,
            max_levels,
        )?;
        let inner = CoreDiscretePowerLaw::new(y_min, opts)?;
        Ok(DiscretePowerLaw { inner, results: None })
    }

    #[getter]
    pub fn y_min(&self) -> u64 {
        self.inner.y_min()
    }

    #[pyo3(
        signature = (values, frequencies = None),
        text_signature = "(self, values, /, frequencies=None)"
    )]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, values: &Bound<'py, PyAny>,
        frequencies: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<PowerLawFitResult> {
        let data = extract_powerlaw_data(py, values, frequencies)?;
        let fit = self.inner.fit(&data)?;
        self.results = Some(fit.clone());
        Ok(PowerLawFitResult { inner: fit })
    }

    #[pyo3(text_signature = "(self, k, alpha)")]
    pub fn pmf(&self, k: u64, alpha: f64) -> PyResult<f64> {
        Ok(self.inner.pmf(k, alpha)?)
    }

    #[pyo3(text_signature = "(self, k, alpha)")]
    pub fn ln_pmf(&self, k: u64, alpha: f64) -> PyResult<f64> {
        Ok(self.inner.ln_pmf(k, alpha)?)
    }

    #[pyo3(text_signature = "(self, k, alpha)")]
    pub fn sf(&self, k: u64, alpha: f64) -> PyResult<f64> {
        Ok(self.inner.sf(k, alpha)?)
    }

    #[pyo3(
        signature = (alpha, values, frequencies = None),
        text_signature = "(self, alpha, values, /, frequencies=None)"
    )]
    pub fn log_likelihood<'py>(
        &self, py: Python<'py>, alpha: f64, values: &Bound<'py, PyAny>,
        frequencies: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<f64> {
        let data = extract_powerlaw_data(py, values, frequencies)?;
        Ok(self.inner.log_likelihood(alpha, &data)?)
    }

    #[pyo3(
        signature = (alpha, values, frequencies = None),
        text_signature = "(self, alpha, values, /, frequencies=None)"
    )]
    pub fn score<'py>(
        &self, py: Python<'py>, alpha: f64, values: &Bound<'py, PyAny>,
        frequencies: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<f64> {
        let data = extract_powerlaw_data(py, values, frequencies)?;
        Ok(self.inner.log_likelihood_grad(alpha, &data)?)
    }

    #[getter]
    pub fn results(&self) -> PyResult<PowerLawFitResult> {
        match &self.results {
            Some(fit) => Ok(PowerLawFitResult { inner: fit.clone() }),
            None => Err(PowerLawError::ModelNotFitted.into()),
        }
    }

    #[getter]
    pub fn alpha(&self) -> PyResult<f64> {
        self.results
            .as_ref()
            .map(|fit| fit.alpha)
            .ok_or_else(|| PyValueError::new_err(PowerLawError::ModelNotFitted.to_string()))
    }
}

/// Initializer of the `_rust_hurwitz` extension module.
///
/// Creates the `special` and `powerlaw` submodules, attaches them, and
/// registers them in `sys.modules` as `rust_hurwitz.special` and
/// `rust_hurwitz.powerlaw`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_hurwitz<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let special_mod = PyModule::new(_py, "special")?;
    let powerlaw_mod = PyModule::new(_py, "powerlaw")?;
    special(_py, m, &special_mod)?;
    powerlaw(_py, m, &powerlaw_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_hurwitz.special", special_mod)?;

    _py.import("sys")?.getattr("modules")?.set_item("rust_hurwitz.powerlaw", powerlaw_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn special<'py>(
    _py: Python, rust_hurwitz: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_hurwitz_zeta, m)?)?;
    m.add_function(wrap_pyfunction!(py_hurwitz_zeta_prime, m)?)?;
    m.add_function(wrap_pyfunction!(py_hurwitz_zeta_checked, m)?)?;
    m.add_class::<PyZetaOutcome>()?;
    rust_hurwitz.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn powerlaw<'py>(
    _py: Python, rust_hurwitz: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<DiscretePowerLaw>()?;
    m.add_class::<PowerLawFitResult>()?;
    rust_hurwitz.add_submodule(m)?;
    Ok(())
}

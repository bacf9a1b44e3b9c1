//! utils — Python argument extraction for the PyO3 bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! converts loosely typed Python inputs (NumPy arrays, pandas Series, plain
//! sequences, optional keyword arguments) into validated Rust values.
//! Validation failures surface as `ValueError` / `TypeError`.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances},
    powerlaw::{
        data::PowerLawData,
        errors::PowerLawError,
        options::{AlphaPrior, DEFAULT_ALPHA0, PowerLawOptions},
    },
    special::options::{DEFAULT_MAX_LEVELS, DEFAULT_MIN_LEVELS, ZetaOptions, default_tolerance},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Borrow a contiguous `float64` view of a NumPy array, pandas Series or
/// sequence, copying only when no contiguous view exists.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of numbers",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Convert an array-like of non-negative integral numbers into `u64`s.
///
/// Integer dtypes are accepted through the `float64` path, so values above
/// 2^53 lose precision; they are rejected rather than silently rounded.
#[cfg(feature = "python-bindings")]
pub fn extract_counts<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Vec<u64>> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous array or sequence"))
    })?;
    slice
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= MAX_EXACT {
                Ok(v as u64)
            } else {
                Err(PyValueError::new_err(format!(
                    "{name}[{i}] = {v} is not a non-negative integer"
                )))
            }
        })
        .collect()
}

/// Build tallied data from `values` and optional `frequencies`; without
/// frequencies, `values` are treated as raw observations.
#[cfg(feature = "python-bindings")]
pub fn extract_powerlaw_data<'py>(
    py: Python<'py>, values: &Bound<'py, PyAny>, frequencies: Option<&Bound<'py, PyAny>>,
) -> PyResult<PowerLawData> {
    let values = extract_counts(py, values, "values")?;
    let data = match frequencies {
        Some(freq) => PowerLawData::new(values, extract_counts(py, freq, "frequencies")?)?,
        None => PowerLawData::from_observations(&values)?,
    };
    Ok(data)
}

/// Assemble [`PowerLawOptions`] from the keyword arguments of the Python
/// `DiscretePowerLaw` constructor.
#[cfg(feature = "python-bindings")]
pub fn build_powerlaw_options(
    alpha0: Option<f64>, prior: Option<(f64, f64)>, tol_grad: Option<f64>,
    tol_cost: Option<f64>, max_iter: Option<usize>, line_searcher: Option<&str>,
    lbfgs_mem: Option<usize>, verbose: Option<bool>, zeta_tol: Option<f64>,
    min_levels: Option<usize>, max_levels: Option<usize>,
) -> PyResult<PowerLawOptions> {
    let mle = extract_mle_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem, verbose)?;
    let zeta = extract_zeta_opts(zeta_tol, min_levels, max_levels)?;
    let prior = match prior {
        Some((shape, rate)) => AlphaPrior::gamma(shape, rate)?,
        None => AlphaPrior::Flat,
    };
    let opts = PowerLawOptions::new(mle, zeta, prior, alpha0.unwrap_or(DEFAULT_ALPHA0))?;
    Ok(opts)
}

/// Quadrature options with defaults filled in.
#[cfg(feature = "python-bindings")]
pub fn extract_zeta_opts(
    tolerance: Option<f64>, min_levels: Option<usize>, max_levels: Option<usize>,
) -> PyResult<ZetaOptions> {
    let opts = ZetaOptions::new(
        tolerance.unwrap_or_else(default_tolerance),
        min_levels.unwrap_or(DEFAULT_MIN_LEVELS),
        max_levels.unwrap_or(DEFAULT_MAX_LEVELS),
    )?;
    Ok(opts)
}

#[cfg(feature = "python-bindings")]
fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>, verbose: Option<bool>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    let defaults = MLEOptions::default();

    // With no stopping rule given, keep the default gradient tolerance and cap.
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        defaults.tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter).map_err(PowerLawError::from)?
    };

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(PowerLawError::from)?,
        None => defaults.line_searcher,
    };

    let opts = MLEOptions::new(tols, ls, verbose.unwrap_or(defaults.verbose), lbfgs_mem)
        .map_err(PowerLawError::from)?;

    Ok(opts)
}

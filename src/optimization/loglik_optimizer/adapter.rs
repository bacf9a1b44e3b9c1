//! Adapter that exposes a user `LogLikelihood` as an Argmin problem.
//!
//! Maximizing `ℓ(θ)` becomes minimizing `c(θ) = −ℓ(θ)`. Analytic gradients
//! are negated; without one, the cost itself is finite-differenced, so that
//! branch needs no sign flip.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::run_fd_diff,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a [`LogLikelihood`] and its payload to Argmin's `CostFunction`
/// and `Gradient`.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    model: &'a F,
    data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(model: &'a F, data: &'a F::Data) -> Self {
        Self { model, data }
    }

    /// Central differences of the cost, falling back to forward differences
    /// when a cost evaluation failed or the result did not validate.
    ///
    /// The difference closure must return `f64`, so the first cost error is
    /// parked in `closure_err` and the closure yields NaN.
    fn numeric_gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let cost_at = |point: &Theta| -> f64 {
            self.cost(point).unwrap_or_else(|e| {
                closure_err.borrow_mut().get_or_insert(e);
                f64::NAN
            })
        };
        let central = theta.central_diff(&cost_at);
        if closure_err.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
            return Ok(central);
        }
        Ok(run_fd_diff(theta, &cost_at, &closure_err)?)
    }
}

impl<F: LogLikelihood> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    /// `c(θ) = −ℓ(θ)`; a non-finite `ℓ` is [`OptError::NonFiniteCost`].
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let ll = self.model.value(theta, self.data)?;
        if ll.is_finite() { Ok(-ll) } else { Err(OptError::NonFiniteCost { value: ll }.into()) }
    }
}

impl<F: LogLikelihood> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// `∇c(θ)`: the validated analytic `−∇ℓ`, or finite differences of the
    /// cost when the model reports [`OptError::GradientNotImplemented`]. Any
    /// other model error is returned as is.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        match self.model.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => self.numeric_gradient(theta),
            Err(e) => Err(e.into()),
        }
    }
}

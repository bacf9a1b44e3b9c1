//! Discrete power law (generalized Zipf) with a lower cutoff.
//!
//! Purpose
//! -------
//! Model positive integer data by
//!
//! ```text
//! P(Y = k) = k^(−α) / ζ(α, y_min),   k ∈ {y_min, y_min + 1, …},  α > 1
//! ```
//!
//! and estimate `α` by maximum likelihood, or maximum a posteriori under a
//! Gamma prior. The normalizer ζ(α, y_min) and its α-derivative come from
//! [`crate::special::hurwitz`]; the score is assembled on a reverse-mode
//! [`Tape`].
//!
//! Key behaviors
//! -------------
//! - [`DiscretePowerLaw::pmf`], [`DiscretePowerLaw::ln_pmf`] and
//!   [`DiscretePowerLaw::sf`] (`P(Y ≥ k) = ζ(α, k) / ζ(α, y_min)`).
//! - [`DiscretePowerLaw::log_likelihood`]:
//!   `ℓ(α) = −α Σ f_k ln k − N ln ζ(α, y_min) + ln p(α)`.
//! - [`DiscretePowerLaw::log_likelihood_grad`]: `dℓ/dα` by backpropagation
//!   through [`ln_hurwitz_zeta_var_checked`].
//! - [`DiscretePowerLaw::fit`]: L-BFGS over `θ` with `α = 1 + softplus(θ)`,
//!   then a standard error from the observed information.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every evaluation validates `α` (finite, > 1) and uses the checked
//!   zeta evaluators with the model's [`ZetaOptions`](crate::special::options::ZetaOptions).
//! - Likelihood terms use ln ζ(α, y_min) directly, so ℓ stays finite for
//!   exponents where ζ(α, y_min) underflows or Γ(α) overflows.
//! - Data passed to likelihood functions must not contain observations
//!   below `y_min`.
//! - The optimizer sees the mean log-likelihood `ℓ(θ)/N`; the argmax is the
//!   same and the scale of the gradient does not grow with the sample size.
//!
//! Conventions
//! -----------
//! - `pmf(k) = 0`, `ln_pmf(k) = −∞` for `k < y_min`; `sf(k) = 1` for
//!   `k ≤ y_min`.
//! - With a prior, "log-likelihood" and "observed information" refer to the
//!   log posterior (up to a constant).
use std::cell::RefCell;

use ndarray::array;

use crate::{
    autodiff::tape::Tape,
    optimization::{
        errors::OptResult,
        loglik_optimizer::{
            Grad, LogLikelihood, OptimOutcome, Theta, finite_diff::compute_hessian, maximize,
        },
        numerical_stability::{safe_logistic, safe_softplus, safe_softplus_inv},
    },
    powerlaw::{
        data::PowerLawData,
        errors::{PowerLawError, PowerLawResult},
        options::PowerLawOptions,
    },
    special::hurwitz::{
        hurwitz_zeta_checked, ln_hurwitz_zeta_checked, ln_hurwitz_zeta_var_checked,
    },
};

/// Map the unconstrained coordinate onto the exponent, `α = 1 + softplus(θ)`.
pub fn alpha_from_theta(theta: f64) -> f64 {
    1.0 + safe_softplus(theta)
}

/// Inverse of [`alpha_from_theta`] for `α > 1`.
pub fn theta_from_alpha(alpha: f64) -> f64 {
    safe_softplus_inv(alpha - 1.0)
}

/// Result of [`DiscretePowerLaw::fit`].
///
/// - `alpha`: estimated exponent.
/// - `std_error`: `1/√I(α̂)` from the observed information, `None` when the
///   curvature at `α̂` is not negative.
/// - `log_likelihood`: `ℓ(α̂)` over the full sample (prior included).
/// - `outcome`: raw optimizer outcome in θ-space, on the mean scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerLawFit {
    pub alpha: f64,
    pub std_error: Option<f64>,
    pub log_likelihood: f64,
    pub outcome: OptimOutcome,
}

/// Discrete power law with lower cutoff `y_min ≥ 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscretePowerLaw {
    y_min: u64,
    options: PowerLawOptions,
}

impl DiscretePowerLaw {
    /// # Errors
    /// - [`PowerLawError::InvalidYMin`] for `y_min == 0`.
    pub fn new(y_min: u64, options: PowerLawOptions) -> PowerLawResult<Self> {
        if y_min == 0 {
            return Err(PowerLawError::InvalidYMin { y_min });
        }
        Ok(Self { y_min, options })
    }

    pub fn y_min(&self) -> u64 {
        self.y_min
    }

    pub fn options(&self) -> &PowerLawOptions {
        &self.options
    }

    /// Normalizing constant ζ(α, y_min).
    ///
    /// # Errors
    /// - [`PowerLawError::InvalidAlpha`] unless `α` is finite and > 1.
    /// - [`PowerLawError::Zeta`] if the quadrature result is not finite or
    ///   unresolved.
    pub fn normalizer(&self, alpha: f64) -> PowerLawResult<f64> {
        validate_alpha(alpha)?;
        Ok(hurwitz_zeta_checked(alpha, self.y_min as f64, &self.options.zeta)?.value)
    }

    /// `ln ζ(α, y_min)`, finite where the normalizer itself underflows.
    ///
    /// # Errors
    /// Same as [`DiscretePowerLaw::normalizer`].
    pub fn ln_normalizer(&self, alpha: f64) -> PowerLawResult<f64> {
        validate_alpha(alpha)?;
        Ok(ln_hurwitz_zeta_checked(alpha, self.y_min as f64, &self.options.zeta)?)
    }

    /// `ln P(Y = k)`.
    ///
    /// # Errors
    /// Same as [`DiscretePowerLaw::normalizer`].
    pub fn ln_pmf(&self, k: u64, alpha: f64) -> PowerLawResult<f64> {
        validate_alpha(alpha)?;
        if k < self.y_min {
            return Ok(f64::NEG_INFINITY);
        }
        Ok(-alpha * (k as f64).ln() - self.ln_normalizer(alpha)?)
    }

    /// `P(Y = k)`.
    ///
    /// # Errors
    /// Same as [`DiscretePowerLaw::normalizer`].
    pub fn pmf(&self, k: u64, alpha: f64) -> PowerLawResult<f64> {
        Ok(self.ln_pmf(k, alpha)?.exp())
    }

    /// Survival function `P(Y ≥ k) = ζ(α, k) / ζ(α, y_min)`.
    ///
    /// # Errors
    /// Same as [`DiscretePowerLaw::normalizer`].
    pub fn sf(&self, k: u64, alpha: f64) -> PowerLawResult<f64> {
        validate_alpha(alpha)?;
        if k <= self.y_min {
            return Ok(1.0);
        }
        let ln_tail = ln_hurwitz_zeta_checked(alpha, k as f64, &self.options.zeta)?;
        Ok((ln_tail - self.ln_normalizer(alpha)?).exp())
    }

    /// Reject data with observations below the cutoff.
    ///
    /// # Errors
    /// - [`PowerLawError::BelowCutoff`] naming the smallest offending value.
    pub fn check_data(&self, data: &PowerLawData) -> PowerLawResult<()> {
        let smallest = data.min_observed();
        if smallest < self.y_min {
            return Err(PowerLawError::BelowCutoff { value: smallest, y_min: self.y_min });
        }
        Ok(())
    }

    /// `ℓ(α) = −α Σ f_k ln k − N ln ζ(α, y_min) + ln p(α)`.
    ///
    /// # Errors
    /// - [`PowerLawError::BelowCutoff`] for invalid data.
    /// - Everything [`DiscretePowerLaw::normalizer`] and the prior return.
    pub fn log_likelihood(&self, alpha: f64, data: &PowerLawData) -> PowerLawResult<f64> {
        self.check_data(data)?;
        let ln_zeta = self.ln_normalizer(alpha)?;
        let kernel = -data.sum_ln_values() * alpha;
        let norm = -(data.total() as f64) * ln_zeta;
        Ok(kernel + norm + self.options.prior.ln_density(alpha)?)
    }

    /// `dℓ/dα = −Σ f_k ln k − N ζ'(α, y_min)/ζ(α, y_min) + d ln p/dα`.
    ///
    /// # Errors
    /// Same as [`DiscretePowerLaw::log_likelihood`].
    pub fn log_likelihood_grad(&self, alpha: f64, data: &PowerLawData) -> PowerLawResult<f64> {
        Ok(self.value_and_grad(alpha, data)?.1)
    }

    /// Observed information `I(α) = −d²ℓ/dα²`, by central differences of the
    /// analytic score.
    ///
    /// # Errors
    /// - Any error raised by the score at the perturbed points.
    /// - [`PowerLawError::Opt`] when the finite-difference Hessian is not
    ///   finite.
    pub fn observed_information(&self, alpha: f64, data: &PowerLawData) -> PowerLawResult<f64> {
        let closure_err: RefCell<Option<PowerLawError>> = RefCell::new(None);
        let score = |a: &Theta| -> Grad {
            match self.log_likelihood_grad(a[0], data) {
                Ok(g) => array![g],
                Err(e) => {
                    closure_err.borrow_mut().get_or_insert(e);
                    array![f64::NAN]
                }
            }
        };
        match compute_hessian(&score, &array![alpha]) {
            Ok(hess) => Ok(-hess[[0, 0]]),
            Err(e) => Err(closure_err.into_inner().unwrap_or(e.into())),
        }
    }

    /// Estimate `α` by L-BFGS and attach a standard error.
    ///
    /// Starts from `options.alpha0`, maximizes the mean log-likelihood in
    /// θ-space, maps `θ̂` back to `α̂`, and computes `1/√I(α̂)`.
    ///
    /// # Errors
    /// - [`PowerLawError::BelowCutoff`] for invalid data.
    /// - [`PowerLawError::Opt`] for solver failures, or the model error that
    ///   stopped the solver. A solver that aborts before leaving `alpha0`
    ///   yields [`OptError::SolverExit`](crate::optimization::errors::OptError::SolverExit);
    ///   one that aborts later returns a fit with `outcome.converged == false`.
    ///
    /// # Examples
    /// ```rust
    /// use rust_hurwitz::powerlaw::{DiscretePowerLaw, PowerLawData, PowerLawOptions};
    ///
    /// let data = PowerLawData::new(vec![1, 2, 3, 4, 6, 9], vec![60, 16, 8, 5, 3, 2]).unwrap();
    /// let model = DiscretePowerLaw::new(1, PowerLawOptions::default()).unwrap();
    /// let fit = model.fit(&data).unwrap();
    /// assert!(fit.alpha > 1.0);
    /// ```
    pub fn fit(&self, data: &PowerLawData) -> PowerLawResult<PowerLawFit> {
        self.check_data(data)?;
        let theta0 = array![theta_from_alpha(self.options.alpha0)];
        let outcome = maximize(self, theta0, data, &self.options.mle)?;
        let alpha = alpha_from_theta(outcome.theta_hat[0]);
        let log_likelihood = self.log_likelihood(alpha, data)?;
        let info = self.observed_information(alpha, data)?;
        let std_error = (info > 0.0).then(|| info.sqrt().recip());
        Ok(PowerLawFit { alpha, std_error, log_likelihood, outcome })
    }

    // ---- Helper methods ----

    /// `(ℓ(α), dℓ/dα)` from one tape: ln ζ and ζ'/ζ are recorded as a
    /// precomputed-gradient node, the rest as elementary operations.
    fn value_and_grad(&self, alpha: f64, data: &PowerLawData) -> PowerLawResult<(f64, f64)> {
        validate_alpha(alpha)?;
        self.check_data(data)?;
        let mut tape = Tape::with_capacity(5);
        let a = tape.variable(alpha);
        let (ln_zeta, _, _) =
            ln_hurwitz_zeta_var_checked(&mut tape, a, self.y_min as f64, &self.options.zeta)?;
        let kernel = tape.scale(a, -data.sum_ln_values())?;
        let norm = tape.scale(ln_zeta, -(data.total() as f64))?;
        let ll = tape.add(kernel, norm)?;
        let d_ll = tape.gradient(ll)?.wrt(a)?;

        let prior = &self.options.prior;
        Ok((ll.value() + prior.ln_density(alpha)?, d_ll + prior.ln_density_deriv(alpha)))
    }

    fn scalar_theta(theta: &Theta) -> PowerLawResult<f64> {
        if theta.len() != 1 {
            return Err(PowerLawError::ThetaLengthMismatch { expected: 1, actual: theta.len() });
        }
        let t = theta[0];
        if !t.is_finite() {
            return Err(PowerLawError::InvalidTheta { value: t });
        }
        Ok(t)
    }
}

impl LogLikelihood for DiscretePowerLaw {
    type Data = PowerLawData;

    /// Mean log-likelihood `ℓ(α(θ)) / N`.
    fn value(&self, theta: &Theta, data: &PowerLawData) -> OptResult<f64> {
        let alpha = alpha_from_theta(Self::scalar_theta(theta)?);
        Ok(self.log_likelihood(alpha, data)? / data.total() as f64)
    }

    fn check(&self, theta: &Theta, data: &PowerLawData) -> OptResult<()> {
        Self::scalar_theta(theta)?;
        self.check_data(data)?;
        Ok(())
    }

    /// `dℓ/dα · dα/dθ / N` with `dα/dθ = logistic(θ)`.
    fn grad(&self, theta: &Theta, data: &PowerLawData) -> OptResult<Grad> {
        let t = Self::scalar_theta(theta)?;
        let d_alpha = self.log_likelihood_grad(alpha_from_theta(t), data)?;
        Ok(array![d_alpha * safe_logistic(t) / data.total() as f64])
    }
}

fn validate_alpha(alpha: f64) -> PowerLawResult<()> {
    if !alpha.is_finite() || alpha <= 1.0 {
        return Err(PowerLawError::InvalidAlpha { value: alpha });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{powerlaw::options::AlphaPrior, special::hurwitz::hurwitz_zeta};
    use approx::assert_relative_eq;
    use statrs::distribution::{Continuous, Gamma};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - pmf / sf consistency and the conventions below the cutoff.
    // - The tape-based score against finite differences of ℓ.
    // - Prior handling, data checks and the θ ↔ α map.
    // - An end-to-end fit on synthetic counts with a known exponent.
    //
    // They intentionally DO NOT cover:
    // - Optimizer internals (see `optimization::loglik_optimizer`).
    // - Quadrature accuracy (see `special::hurwitz`).
    // -------------------------------------------------------------------------

    fn small_data() -> PowerLawData {
        PowerLawData::new(vec![2, 3, 4, 5, 7, 10, 15], vec![40, 18, 10, 6, 4, 2, 1]).unwrap()
    }

    fn flat_model(y_min: u64) -> DiscretePowerLaw {
        DiscretePowerLaw::new(y_min, PowerLawOptions::default()).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // pmf and sf must satisfy sf(k) = pmf(k) + sf(k + 1).
    //
    // Given
    // -----
    // - y_min = 2, α = 2.3, k = 2..=6.
    //
    // Expect
    // ------
    // - Agreement to 1e-6 relative; sf(y_min) = 1 exactly.
    fn pmf_and_sf_are_consistent() {
        // Arrange
        let model = flat_model(2);
        let alpha = 2.3;

        // Act / Assert
        assert_eq!(model.sf(2, alpha).unwrap(), 1.0);
        for k in 2..=6 {
            let lhs = model.sf(k, alpha).unwrap();
            let rhs = model.pmf(k, alpha).unwrap() + model.sf(k + 1, alpha).unwrap();
            assert_relative_eq!(lhs, rhs, max_relative = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Values below the cutoff have zero mass and full survival.
    //
    // Given
    // -----
    // - y_min = 3, α = 2.
    //
    // Expect
    // ------
    // - pmf(1) = 0, ln_pmf(2) = −∞, sf(1) = 1, pmf(3) = 3^{−2} / ζ(2, 3).
    fn below_cutoff_conventions() {
        // Arrange
        let model = flat_model(3);

        // Act / Assert
        assert_eq!(model.pmf(1, 2.0).unwrap(), 0.0);
        assert_eq!(model.ln_pmf(2, 2.0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(model.sf(1, 2.0).unwrap(), 1.0);
        assert_relative_eq!(
            model.pmf(3, 2.0).unwrap(),
            (1.0 / 9.0) / hurwitz_zeta(2.0, 3.0),
            max_relative = 1e-12
        );
    }

    #[test]
    // Purpose
    // -------
    // The tape-based score matches a central difference of ℓ.
    //
    // Given
    // -----
    // - Small tallied data, y_min = 2, α ∈ {1.6, 2.4, 3.5}, h = 1e-5.
    //
    // Expect
    // ------
    // - Relative agreement within 1e-5.
    fn score_matches_central_difference() {
        // Arrange
        let model = flat_model(2);
        let data = small_data();
        let h = 1e-5;

        for alpha in [1.6, 2.4, 3.5] {
            // Act
            let grad = model.log_likelihood_grad(alpha, &data).unwrap();
            let up = model.log_likelihood(alpha + h, &data).unwrap();
            let down = model.log_likelihood(alpha - h, &data).unwrap();

            // Assert
            assert_relative_eq!(grad, (up - down) / (2.0 * h), max_relative = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // Line searches may try exponents far beyond the data. ℓ and its score
    // must stay finite there, where Γ(α) overflows and ζ(α, y_min)
    // underflows, and the score must point back toward the data.
    //
    // Given
    // -----
    // - Small tallied data, y_min = 2, α ∈ {180, 400, 1500}.
    //
    // Expect
    // ------
    // - Finite ℓ close to −α Σ f ln k + N α ln 2 and a finite negative score.
    fn likelihood_is_finite_for_large_exponents() {
        // Arrange
        let model = flat_model(2);
        let data = small_data();
        let n = data.total() as f64;

        for alpha in [180.0, 400.0, 1500.0] {
            // Act
            let ll = model.log_likelihood(alpha, &data).unwrap();
            let score = model.log_likelihood_grad(alpha, &data).unwrap();

            // Assert
            let leading = -alpha * data.sum_ln_values() + n * alpha * 2f64.ln();
            assert_relative_eq!(ll, leading, max_relative = 1e-9);
            assert!(score.is_finite() && score < 0.0, "alpha = {alpha}, score = {score}");
        }
    }

    #[test]
    // Purpose
    // -------
    // A Gamma prior adds exactly its log density and its derivative.
    //
    // Given
    // -----
    // - Gamma(2, 0.5) prior, α = 2.2.
    //
    // Expect
    // ------
    // - ℓ_prior − ℓ_flat = ln p(α) and the same for the score.
    fn prior_adds_log_density() {
        // Arrange
        let data = small_data();
        let flat = flat_model(2);
        let opts = PowerLawOptions {
            prior: AlphaPrior::gamma(2.0, 0.5).unwrap(),
            ..PowerLawOptions::default()
        };
        let map = DiscretePowerLaw::new(2, opts).unwrap();
        let alpha = 2.2;

        // Act
        let diff = map.log_likelihood(alpha, &data).unwrap()
            - flat.log_likelihood(alpha, &data).unwrap();
        let grad_diff = map.log_likelihood_grad(alpha, &data).unwrap()
            - flat.log_likelihood_grad(alpha, &data).unwrap();

        // Assert
        let ln_p = Gamma::new(2.0, 0.5).unwrap().ln_pdf(alpha);
        assert_relative_eq!(diff, ln_p, max_relative = 1e-9);
        assert_relative_eq!(grad_diff, 1.0 / alpha - 0.5, max_relative = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Invalid inputs are reported with the matching error variant.
    //
    // Given
    // -----
    // - y_min = 0; α = 1 and NaN; data containing 3 with y_min = 5.
    //
    // Expect
    // ------
    // - InvalidYMin, InvalidAlpha and BelowCutoff { value: 3, y_min: 5 }.
    fn invalid_inputs_are_rejected() {
        assert_eq!(
            DiscretePowerLaw::new(0, PowerLawOptions::default()).unwrap_err(),
            PowerLawError::InvalidYMin { y_min: 0 }
        );

        let model = flat_model(5);
        assert!(matches!(model.normalizer(1.0), Err(PowerLawError::InvalidAlpha { .. })));
        assert!(matches!(model.pmf(6, f64::NAN), Err(PowerLawError::InvalidAlpha { .. })));

        let data = PowerLawData::new(vec![3, 6, 8], vec![1, 4, 2]).unwrap();
        assert_eq!(
            model.log_likelihood(2.0, &data).unwrap_err(),
            PowerLawError::BelowCutoff { value: 3, y_min: 5 }
        );
        assert!(matches!(model.fit(&data), Err(PowerLawError::BelowCutoff { .. })));
    }

    #[test]
    // Purpose
    // -------
    // The θ ↔ α map is a bijection onto (1, ∞) and the optimizer gradient
    // applies its Jacobian.
    //
    // Given
    // -----
    // - α ∈ {1.05, 2.5, 40}; θ = θ(2.5) for the gradient check.
    //
    // Expect
    // ------
    // - α(θ(α)) = α; grad(θ) = dℓ/dα · logistic(θ) / N.
    fn theta_map_and_chain_rule() {
        for alpha in [1.05, 2.5, 40.0] {
            assert_relative_eq!(alpha_from_theta(theta_from_alpha(alpha)), alpha, max_relative = 1e-12);
        }

        // Arrange
        let model = flat_model(2);
        let data = small_data();
        let theta = array![theta_from_alpha(2.5)];

        // Act
        let grad = model.grad(&theta, &data).unwrap();

        // Assert
        let expected = model.log_likelihood_grad(2.5, &data).unwrap() * safe_logistic(theta[0])
            / data.total() as f64;
        assert_relative_eq!(grad[0], expected, max_relative = 1e-12);
        assert!(model.check(&array![0.1, 0.2], &data).is_err());
    }

    #[test]
    // Purpose
    // -------
    // The observed information is the negative slope of the score.
    //
    // Given
    // -----
    // - Small data, y_min = 2, α = 2.
    //
    // Expect
    // ------
    // - I(α) > 0 and within 1e-3 of −(g(α + h) − g(α − h)) / 2h, h = 1e-4.
    fn observed_information_matches_score_slope() {
        // Arrange
        let model = flat_model(2);
        let data = small_data();
        let (alpha, h) = (2.0, 1e-4);

        // Act
        let info = model.observed_information(alpha, &data).unwrap();

        // Assert
        let up = model.log_likelihood_grad(alpha + h, &data).unwrap();
        let down = model.log_likelihood_grad(alpha - h, &data).unwrap();
        assert!(info > 0.0);
        assert_relative_eq!(info, -(up - down) / (2.0 * h), max_relative = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Recover a known exponent from expected counts.
    //
    // Given
    // -----
    // - f_k = round(N k^{−2.5} / ζ(2.5)) for k = 1..=2000, N = 1e5, y_min = 1.
    //
    // Expect
    // ------
    // - Converged fit with |α̂ − 2.5| < 0.05, a small positive standard
    //   error, and `log_likelihood` equal to ℓ(α̂).
    fn fit_recovers_known_exponent() {
        // Arrange
        let alpha_true = 2.5;
        let zeta = hurwitz_zeta(alpha_true, 1.0);
        let values: Vec<u64> = (1..=2000).collect();
        let frequencies: Vec<u64> = values
            .iter()
            .map(|&k| (1e5 * (k as f64).powf(-alpha_true) / zeta).round() as u64)
            .collect();
        let data = PowerLawData::new(values, frequencies).unwrap();
        let model = flat_model(1);

        // Act
        let fit = model.fit(&data).unwrap();

        // Assert
        assert!(fit.outcome.converged);
        assert!((fit.alpha - alpha_true).abs() < 0.05, "alpha = {}", fit.alpha);
        let se = fit.std_error.expect("curvature at the optimum is negative");
        assert!(se > 0.0 && se < 0.05);
        assert_relative_eq!(
            fit.log_likelihood,
            model.log_likelihood(fit.alpha, &data).unwrap(),
            max_relative = 1e-12
        );
    }
}

//! Configuration for fitting the discrete power law.
//!
//! - [`AlphaPrior`]: optional Gamma prior on the exponent, turning the
//!   maximum-likelihood fit into a MAP fit.
//! - [`PowerLawOptions`]: optimizer options, quadrature options, prior and
//!   starting exponent, validated together.
use statrs::distribution::{Continuous, Gamma};

use crate::{
    optimization::loglik_optimizer::MLEOptions,
    powerlaw::errors::{PowerLawError, PowerLawResult},
    special::options::ZetaOptions,
};

/// Default starting exponent for a fit.
pub const DEFAULT_ALPHA0: f64 = 2.0;

/// Prior on the exponent `α`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlphaPrior {
    /// No prior: plain maximum likelihood.
    Flat,
    /// `α ~ Gamma(shape, rate)` (rate parameterization).
    Gamma { shape: f64, rate: f64 },
}

impl AlphaPrior {
    /// Validated Gamma prior.
    ///
    /// # Errors
    /// - [`PowerLawError::InvalidPrior`] unless both parameters are finite
    ///   and > 0.
    pub fn gamma(shape: f64, rate: f64) -> PowerLawResult<Self> {
        Gamma::new(shape, rate).map_err(|_| PowerLawError::InvalidPrior {
            shape,
            rate,
            reason: "Shape and rate must be finite and > 0.",
        })?;
        Ok(AlphaPrior::Gamma { shape, rate })
    }

    /// `ln p(α)`; zero for [`AlphaPrior::Flat`].
    ///
    /// # Errors
    /// - [`PowerLawError::InvalidPrior`] for a hand-built variant with
    ///   invalid parameters.
    pub fn ln_density(&self, alpha: f64) -> PowerLawResult<f64> {
        match *self {
            AlphaPrior::Flat => Ok(0.0),
            AlphaPrior::Gamma { shape, rate } => {
                let gamma = Gamma::new(shape, rate).map_err(|_| PowerLawError::InvalidPrior {
                    shape,
                    rate,
                    reason: "Shape and rate must be finite and > 0.",
                })?;
                Ok(gamma.ln_pdf(alpha))
            }
        }
    }

    /// `d ln p(α) / dα`; zero for [`AlphaPrior::Flat`].
    pub fn ln_density_deriv(&self, alpha: f64) -> f64 {
        match *self {
            AlphaPrior::Flat => 0.0,
            AlphaPrior::Gamma { shape, rate } => (shape - 1.0) / alpha - rate,
        }
    }
}

/// Options for [`DiscretePowerLaw`](crate::powerlaw::model::DiscretePowerLaw).
///
/// Fields
/// ------
/// - `mle`: L-BFGS configuration.
/// - `zeta`: quadrature configuration for every ζ(α, ·) evaluation.
/// - `prior`: prior on `α`.
/// - `alpha0`: starting exponent, finite and > 1.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerLawOptions {
    pub mle: MLEOptions,
    pub zeta: ZetaOptions,
    pub prior: AlphaPrior,
    pub alpha0: f64,
}

impl PowerLawOptions {
    /// # Errors
    /// - [`PowerLawError::InvalidAlpha`] for a non-finite `alpha0` or one ≤ 1.
    /// - [`PowerLawError::InvalidPrior`] for an invalid Gamma prior.
    pub fn new(
        mle: MLEOptions, zeta: ZetaOptions, prior: AlphaPrior, alpha0: f64,
    ) -> PowerLawResult<Self> {
        if !alpha0.is_finite() || alpha0 <= 1.0 {
            return Err(PowerLawError::InvalidAlpha { value: alpha0 });
        }
        if let AlphaPrior::Gamma { shape, rate } = prior {
            AlphaPrior::gamma(shape, rate)?;
        }
        Ok(Self { mle, zeta, prior, alpha0 })
    }
}

impl Default for PowerLawOptions {
    fn default() -> Self {
        Self {
            mle: MLEOptions::default(),
            zeta: ZetaOptions::default(),
            prior: AlphaPrior::Flat,
            alpha0: DEFAULT_ALPHA0,
        }
    }
}

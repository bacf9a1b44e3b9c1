//! Tallied count data for the discrete power law.
//!
//! Purpose
//! -------
//! Hold positive integer observations in tallied form (distinct values with
//! their frequencies) and precompute the sufficient statistics the
//! log-likelihood needs, so every likelihood evaluation is O(1) in the data.
//!
//! Key behaviors
//! -------------
//! - [`PowerLawData::new`] validates a `(values, frequencies)` pair: equal
//!   lengths, values ≥ 1 and distinct, at least one positive frequency.
//!   Zero frequencies are allowed, so a dense value grid `min..=max` with
//!   unobserved entries is accepted as is.
//! - [`PowerLawData::from_observations`] tallies raw samples.
//! - The sufficient statistics `N = Σ f_k` and `Σ f_k ln k` are computed
//!   once at construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Values are stored sorted ascending; frequencies follow their values.
//! - `total() > 0` and `min_observed() ≥ 1`.
//! - The lower cutoff of a model is *not* known here; checking
//!   observations against `y_min` is the model's job.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, each validation failure, and
//!   agreement between tallied and raw construction.
use std::collections::BTreeMap;

use crate::powerlaw::errors::{PowerLawError, PowerLawResult};

/// `PowerLawData` — distinct positive values with their frequencies.
///
/// Fields
/// ------
/// - `values`: distinct observed values, ascending, each ≥ 1.
/// - `frequencies`: count of each value (may be zero).
/// - `total`: `N = Σ frequencies`, > 0.
/// - `sum_ln_values`: `Σ f_k ln k`.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerLawData {
    values: Vec<u64>,
    frequencies: Vec<u64>,
    total: u64,
    sum_ln_values: f64,
}

impl PowerLawData {
    /// Construct validated tallied data.
    ///
    /// # Errors
    /// - [`PowerLawError::LengthMismatch`] if the slices differ in length.
    /// - [`PowerLawError::EmptyData`] if no values are given.
    /// - [`PowerLawError::InvalidValue`] for the first value equal to 0.
    /// - [`PowerLawError::DuplicateValue`] if a value repeats.
    /// - [`PowerLawError::ZeroTotal`] if every frequency is zero.
    /// - [`PowerLawError::TotalOverflow`] if the frequencies sum past `u64::MAX`.
    ///
    /// # Examples
    /// ```rust
    /// use rust_hurwitz::powerlaw::data::PowerLawData;
    ///
    /// let data = PowerLawData::new(vec![3, 1, 2], vec![1, 5, 0]).unwrap();
    /// assert_eq!(data.values(), &[1, 2, 3]);
    /// assert_eq!(data.frequencies(), &[5, 0, 1]);
    /// assert_eq!(data.total(), 6);
    /// ```
    pub fn new(values: Vec<u64>, frequencies: Vec<u64>) -> PowerLawResult<Self> {
        if values.len() != frequencies.len() {
            return Err(PowerLawError::LengthMismatch {
                values: values.len(),
                frequencies: frequencies.len(),
            });
        }
        if values.is_empty() {
            return Err(PowerLawError::EmptyData);
        }
        if let Some(index) = values.iter().position(|&v| v == 0) {
            return Err(PowerLawError::InvalidValue { index, value: values[index] });
        }

        let mut pairs: Vec<(u64, u64)> = values.into_iter().zip(frequencies).collect();
        pairs.sort_unstable_by_key(|&(value, _)| value);
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(PowerLawError::DuplicateValue { value: w[0].0 });
        }

        let total = pairs
            .iter()
            .try_fold(0u64, |acc, &(_, f)| acc.checked_add(f))
            .ok_or(PowerLawError::TotalOverflow)?;
        if total == 0 {
            return Err(PowerLawError::ZeroTotal);
        }
        let sum_ln_values: f64 = pairs.iter().map(|&(v, f)| f as f64 * (v as f64).ln()).sum();
        let (values, frequencies): (Vec<u64>, Vec<u64>) = pairs.into_iter().unzip();
        Ok(Self { values, frequencies, total, sum_ln_values })
    }

    /// Tally raw observations into distinct values and counts.
    ///
    /// # Errors
    /// - [`PowerLawError::EmptyData`] for an empty slice.
    /// - [`PowerLawError::InvalidValue`] for the first zero observation.
    pub fn from_observations(observations: &[u64]) -> PowerLawResult<Self> {
        if observations.is_empty() {
            return Err(PowerLawError::EmptyData);
        }
        if let Some(index) = observations.iter().position(|&v| v == 0) {
            return Err(PowerLawError::InvalidValue { index, value: 0 });
        }
        let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
        for &obs in observations {
            *counts.entry(obs).or_insert(0) += 1;
        }
        let (values, frequencies): (Vec<u64>, Vec<u64>) = counts.into_iter().unzip();
        Self::new(values, frequencies)
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn frequencies(&self) -> &[u64] {
        &self.frequencies
    }

    /// Number of observations `N`.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `Σ f_k ln k`.
    pub fn sum_ln_values(&self) -> f64 {
        self.sum_ln_values
    }

    /// Smallest value with a positive frequency.
    pub fn min_observed(&self) -> u64 {
        self.values
            .iter()
            .zip(&self.frequencies)
            .find(|&(_, &f)| f > 0)
            .map_or(self.values[0], |(&v, _)| v)
    }
}

//! Common data types for countfit

use serde::{Deserialize, Serialize};

/// Result of fitting one distribution variant to a sample.
///
/// Produced once per (variant, sample) pair and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    /// Best-fit parameter values
    pub params: Vec<f64>,

    /// Log-likelihood at the fitted parameters
    pub log_likelihood: f64,

    /// Kolmogorov-Smirnov D statistic against the empirical CDF
    pub ks_statistic: f64,
}

impl FitResult {
    /// Create a new fit result
    pub fn new(params: Vec<f64>, log_likelihood: f64, ks_statistic: f64) -> Self {
        Self { params, log_likelihood, ks_statistic }
    }

    /// Whether every stored value is finite.
    ///
    /// The fitting engine rejects results that fail this check instead of
    /// letting NaN/Inf propagate into a selection report.
    pub fn is_finite(&self) -> bool {
        self.params.iter().all(|p| p.is_finite())
            && self.log_likelihood.is_finite()
            && self.ks_statistic.is_finite()
    }
}

//! Single-variant parameter fitting.
//!
//! Two fitting modes share the same simplex search: maximum likelihood
//! minimizes the negative log-likelihood, and distance fitting minimizes the
//! Kolmogorov-Smirnov statistic against the empirical cdf. Whichever
//! quantity was not optimized is evaluated once at the fitted parameters, so
//! every [`FitResult`] carries both.

use cf_core::{Error, FitResult, Result};
use cf_prob::{DEFAULT_DOMAIN, DEFAULT_EPSILON, DistributionKind, empirical};

use crate::measures::ks_statistic;
use crate::optimizer::{ObjectiveFunction, OptimizerConfig, SimplexOptimizer};

/// Configuration shared by both fitting modes.
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Upper bound of the evaluation domain for pmf/cdf construction.
    pub domain: usize,
    /// Degenerate-parameter threshold.
    pub epsilon: f64,
    /// Simplex search settings.
    pub optimizer: OptimizerConfig,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN,
            epsilon: DEFAULT_EPSILON,
            optimizer: OptimizerConfig::default(),
        }
    }
}

/// Negative log-likelihood of a variant on fixed data.
struct NegLogLikelihood<'a> {
    kind: DistributionKind,
    data: &'a [u64],
    epsilon: f64,
}

impl ObjectiveFunction for NegLogLikelihood<'_> {
    fn eval(&self, params: &[f64]) -> Result<f64> {
        // -(-inf) = +inf marks invalid parameter regions for the search.
        Ok(-self.kind.log_likelihood(params, self.data, false, self.epsilon)?)
    }
}

/// Kolmogorov-Smirnov distance between a variant's cdf and the empirical cdf.
struct KsDistance<'a> {
    kind: DistributionKind,
    empirical_cdf: &'a [f64],
    domain: usize,
    epsilon: f64,
}

impl ObjectiveFunction for KsDistance<'_> {
    fn eval(&self, params: &[f64]) -> Result<f64> {
        match self.kind.cdf(params, self.domain, self.epsilon) {
            Ok(cdf) => Ok(ks_statistic(&cdf, self.empirical_cdf)),
            // An unusable kernel is an out-of-domain point, not a failure of
            // the fit as a whole.
            Err(_) => Ok(f64::INFINITY),
        }
    }
}

fn check_fittable(kind: DistributionKind) -> Result<()> {
    if kind.arity() == 0 {
        return Err(Error::Validation(format!("{kind} has no parameters to fit")));
    }
    Ok(())
}

// The KS objective lives in [0, 1], so the likelihood-scale cost-sd
// tolerance would stop the simplex before its first reflection on most
// samples.
const KS_SD_TOLERANCE: f64 = 1e-9;

fn run_search(
    kind: DistributionKind,
    objective: &dyn ObjectiveFunction,
    optimizer_config: OptimizerConfig,
) -> Result<(Vec<f64>, f64)> {
    let optimizer = SimplexOptimizer::new(optimizer_config);
    let result = optimizer.minimize(objective, kind.initial_params())?;
    log::debug!("{kind}: {result}");
    if !result.converged {
        log::warn!("{kind}: search terminated without convergence: {}", result.message);
    }
    if !result.fval.is_finite() || result.parameters.iter().any(|p| !p.is_finite()) {
        return Err(Error::OptimizationDiverged(format!(
            "{kind}: search ended at an unusable point (fval = {}, params = {:?})",
            result.fval, result.parameters
        )));
    }
    Ok((result.parameters, result.fval))
}

/// Fit a variant by maximum likelihood.
///
/// The Kolmogorov-Smirnov statistic of the fitted model is evaluated
/// post-hoc over `config.domain`.
pub fn fit_by_likelihood(
    kind: DistributionKind,
    data: &[u64],
    config: &FitConfig,
) -> Result<FitResult> {
    check_fittable(kind)?;
    let empirical_cdf = empirical::sample_cdf(data)?;

    let objective = NegLogLikelihood { kind, data, epsilon: config.epsilon };
    let (params, fval) = run_search(kind, &objective, config.optimizer.clone())?;

    let model_cdf = kind.cdf(&params, config.domain, config.epsilon)?;
    let ks = ks_statistic(&model_cdf, &empirical_cdf);
    Ok(FitResult::new(params, -fval, ks))
}

/// Fit a variant by minimizing the Kolmogorov-Smirnov statistic.
///
/// The comparison domain is capped at the largest observation; the
/// log-likelihood of the fitted model is evaluated post-hoc.
pub fn fit_by_ks(kind: DistributionKind, data: &[u64], config: &FitConfig) -> Result<FitResult> {
    check_fittable(kind)?;
    let empirical_cdf = empirical::sample_cdf(data)?;
    let domain = (empirical::sample_max(data)? as usize).min(config.domain);

    let objective =
        KsDistance { kind, empirical_cdf: &empirical_cdf, domain, epsilon: config.epsilon };
    let optimizer_config = OptimizerConfig {
        sd_tolerance: config.optimizer.sd_tolerance.min(KS_SD_TOLERANCE),
        ..config.optimizer.clone()
    };
    let (params, fval) = run_search(kind, &objective, optimizer_config)?;

    let log_likelihood = kind.log_likelihood(&params, data, false, config.epsilon)?;
    Ok(FitResult::new(params, log_likelihood, fval))
}

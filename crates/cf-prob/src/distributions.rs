//! The closed set of distribution variants and their dispatching operations.
//!
//! Variants form a tagged union with exhaustive matching rather than a
//! string-keyed registry; parameter payloads are arity-checked at every
//! entry point. Degenerate parameter regions resolve through a single
//! substitution step shared by `pmf`, `sample` and `log_likelihood`, so a
//! substituted variant behaves identically across all three.

use std::fmt;
use std::str::FromStr;

use cf_core::{Error, Result};
use rand::Rng;
use rand::distributions::{Distribution as _, WeightedIndex};
use rand_distr::Poisson as RandPoisson;
use serde::{Deserialize, Serialize};

use crate::math::exp_clamped;
use crate::{
    delta, exponential, lognormal, normal, poisson, shifted_power_law,
    truncated_power_law, uniform, weibull,
};

/// Tag for one distribution variant.
///
/// The seven fittable variants plus the two internal substitution targets
/// ([`Delta`](DistributionKind::Delta) and
/// [`Uniform`](DistributionKind::Uniform)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionKind {
    /// Point mass (substitution target).
    Delta,
    /// Discrete exponential.
    Exponential,
    /// Discrete log-normal.
    Lognormal,
    /// Discrete normal.
    Normal,
    /// Poisson.
    Poisson,
    /// Power law with a location shift.
    ShiftedPowerLaw,
    /// Power law with an exponential cutoff.
    TruncatedPowerLaw,
    /// Flat over the domain (substitution target).
    Uniform,
    /// Discrete Weibull.
    Weibull,
}

/// Outcome of degenerate-parameter resolution for one `(variant, params)`
/// pair.
enum Resolved {
    /// Evaluate the variant's own kernel.
    Native,
    /// Substitute a point mass at the given location.
    Delta(f64),
    /// Substitute a flat distribution.
    Uniform,
    /// No kernel and no substitution covers these parameters.
    Invalid,
}

impl DistributionKind {
    /// The default model-selection registry: every fittable variant, in
    /// alphabetical tag order.
    pub const CANDIDATES: [DistributionKind; 7] = [
        DistributionKind::Exponential,
        DistributionKind::Lognormal,
        DistributionKind::Normal,
        DistributionKind::Poisson,
        DistributionKind::ShiftedPowerLaw,
        DistributionKind::TruncatedPowerLaw,
        DistributionKind::Weibull,
    ];

    /// Kebab-case tag.
    pub fn tag(&self) -> &'static str {
        match self {
            DistributionKind::Delta => "delta",
            DistributionKind::Exponential => "exponential",
            DistributionKind::Lognormal => "lognormal",
            DistributionKind::Normal => "normal",
            DistributionKind::Poisson => "poisson",
            DistributionKind::ShiftedPowerLaw => "shifted-power-law",
            DistributionKind::TruncatedPowerLaw => "truncated-power-law",
            DistributionKind::Uniform => "uniform",
            DistributionKind::Weibull => "weibull",
        }
    }

    /// Number of real parameters.
    pub fn arity(&self) -> usize {
        match self {
            DistributionKind::Uniform => 0,
            DistributionKind::Delta
            | DistributionKind::Exponential
            | DistributionKind::Poisson => 1,
            DistributionKind::Lognormal
            | DistributionKind::Normal
            | DistributionKind::ShiftedPowerLaw
            | DistributionKind::TruncatedPowerLaw
            | DistributionKind::Weibull => 2,
        }
    }

    /// Fixed initial parameter vector used to seed every fit.
    ///
    /// Part of the fitting contract: changing a seed changes the
    /// reproducible fit results.
    pub fn initial_params(&self) -> &'static [f64] {
        match self {
            DistributionKind::Delta => &[0.0],
            DistributionKind::Exponential => &[10.0],
            DistributionKind::Lognormal => &[1.0, 0.5],
            DistributionKind::Normal => &[10.0, 5.0],
            DistributionKind::Poisson => &[10.0],
            DistributionKind::ShiftedPowerLaw => &[1.2, 1.0],
            DistributionKind::TruncatedPowerLaw => &[1.2, 50.0],
            DistributionKind::Uniform => &[],
            DistributionKind::Weibull => &[3.2, 0.8],
        }
    }

    /// Printable parameter description, e.g. `lambda = 3.40000`.
    pub fn describe(&self, params: &[f64]) -> Result<String> {
        self.check_params(params)?;
        Ok(match self {
            DistributionKind::Delta => format!("x0 = {:.5}", params[0]),
            DistributionKind::Exponential => format!("beta = {:.5}", params[0]),
            DistributionKind::Lognormal => {
                format!("(mu, sigma) = ({:.5}, {:.5})", params[0], params[1])
            }
            DistributionKind::Normal => {
                format!("(mu, sigma) = ({:.5}, {:.5})", params[0], params[1])
            }
            DistributionKind::Poisson => format!("lambda = {:.5}", params[0]),
            DistributionKind::ShiftedPowerLaw => {
                format!("(gamma, x0) = ({:.5}, {:.5})", params[0], params[1])
            }
            DistributionKind::TruncatedPowerLaw => {
                format!("(gamma, kappa) = ({:.5}, {:.5})", params[0], params[1])
            }
            DistributionKind::Uniform => "no parameters".to_string(),
            DistributionKind::Weibull => {
                format!("(k, lambda) = ({:.5}, {:.5})", params[0], params[1])
            }
        })
    }

    fn check_params(&self, params: &[f64]) -> Result<()> {
        if params.len() != self.arity() {
            return Err(Error::Validation(format!(
                "{} expects {} parameter(s), got {}",
                self,
                self.arity(),
                params.len()
            )));
        }
        Ok(())
    }

    /// Resolve the degenerate-substitution rules for this parameter point.
    ///
    /// Every operation dispatches through this single resolution, which is
    /// what guarantees pmf, sampling and likelihood substitute identically.
    fn resolve(&self, params: &[f64], epsilon: f64) -> Resolved {
        if params.iter().any(|p| !p.is_finite()) {
            return Resolved::Invalid;
        }
        match self {
            DistributionKind::Delta | DistributionKind::Uniform => Resolved::Native,
            DistributionKind::Poisson | DistributionKind::Exponential => {
                if params[0] < epsilon {
                    Resolved::Delta(0.0)
                } else {
                    Resolved::Native
                }
            }
            DistributionKind::Lognormal => {
                if params[1] < epsilon {
                    Resolved::Delta(exp_clamped(params[0]))
                } else {
                    Resolved::Native
                }
            }
            DistributionKind::Normal => {
                if params[0] < epsilon {
                    Resolved::Delta(0.0)
                } else if params[1] < epsilon {
                    Resolved::Delta(params[0])
                } else {
                    Resolved::Native
                }
            }
            DistributionKind::Weibull => {
                if params[0] < epsilon || params[1] < epsilon {
                    Resolved::Delta(0.0)
                } else {
                    Resolved::Native
                }
            }
            DistributionKind::ShiftedPowerLaw => {
                let (gamma, x0) = (params[0], params[1]);
                if gamma < epsilon {
                    if x0 < epsilon { Resolved::Delta(0.0) } else { Resolved::Uniform }
                } else if x0 <= 0.0 {
                    Resolved::Invalid
                } else {
                    let c = shifted_power_law::normalizer(gamma, x0);
                    if !c.is_finite() {
                        Resolved::Invalid
                    } else if c < epsilon {
                        Resolved::Delta(0.0)
                    } else {
                        Resolved::Native
                    }
                }
            }
            DistributionKind::TruncatedPowerLaw => {
                let (gamma, kappa) = (params[0], params[1]);
                if gamma < epsilon {
                    Resolved::Uniform
                } else if kappa < epsilon {
                    Resolved::Delta(1.0)
                } else {
                    let c = truncated_power_law::normalizer(gamma, kappa);
                    if !c.is_finite() {
                        Resolved::Invalid
                    } else if c < epsilon {
                        Resolved::Delta(1.0)
                    } else {
                        Resolved::Native
                    }
                }
            }
        }
    }

    fn invalid_params(&self, params: &[f64]) -> Error {
        Error::Computation(format!(
            "{}: parameters {:?} are outside the kernel domain",
            self, params
        ))
    }

    /// Probability mass function of length `domain + 1`.
    pub fn pmf(&self, params: &[f64], domain: usize, epsilon: f64) -> Result<Vec<f64>> {
        self.check_params(params)?;
        match self.resolve(params, epsilon) {
            Resolved::Delta(x0) => Ok(delta::pmf(x0, domain)),
            Resolved::Uniform => Ok(uniform::pmf(domain)),
            Resolved::Invalid => Err(self.invalid_params(params)),
            Resolved::Native => {
                let p = match self {
                    DistributionKind::Delta => Some(delta::pmf(params[0], domain)),
                    DistributionKind::Exponential => {
                        Some(exponential::pmf(params[0], domain))
                    }
                    DistributionKind::Lognormal => {
                        lognormal::pmf(params[0], params[1], domain)
                    }
                    DistributionKind::Normal => normal::pmf(params[0], params[1], domain),
                    DistributionKind::Poisson => Some(poisson::pmf(params[0], domain)),
                    DistributionKind::ShiftedPowerLaw => {
                        shifted_power_law::pmf(params[0], params[1], domain)
                    }
                    DistributionKind::TruncatedPowerLaw => {
                        truncated_power_law::pmf(params[0], params[1], domain)
                    }
                    DistributionKind::Uniform => Some(uniform::pmf(domain)),
                    DistributionKind::Weibull => {
                        weibull::pmf(params[0], params[1], domain, epsilon)
                    }
                };
                p.ok_or_else(|| self.invalid_params(params))
            }
        }
    }

    /// Cumulative distribution function: prefix sum of [`pmf`](Self::pmf).
    pub fn cdf(&self, params: &[f64], domain: usize, epsilon: f64) -> Result<Vec<f64>> {
        let mut acc = 0.0;
        Ok(self
            .pmf(params, domain, epsilon)?
            .into_iter()
            .map(|p| {
                acc += p;
                acc
            })
            .collect())
    }

    /// Draw `size` samples by weighted discrete sampling proportional to the
    /// pmf kernel (Poisson draws come from `rand_distr` directly).
    pub fn sample<R: Rng + ?Sized>(
        &self,
        params: &[f64],
        size: usize,
        domain: usize,
        epsilon: f64,
        rng: &mut R,
    ) -> Result<Vec<u64>> {
        self.check_params(params)?;
        match self.resolve(params, epsilon) {
            Resolved::Delta(x0) => Ok(delta::sample(x0, size)),
            Resolved::Uniform => Ok(uniform::sample(size, domain, rng)),
            Resolved::Invalid => Err(self.invalid_params(params)),
            Resolved::Native => match self {
                DistributionKind::Delta => Ok(delta::sample(params[0], size)),
                DistributionKind::Uniform => Ok(uniform::sample(size, domain, rng)),
                DistributionKind::Poisson => {
                    let pois = RandPoisson::new(params[0]).map_err(|e| {
                        Error::Computation(format!("Poisson sampler: {e}"))
                    })?;
                    Ok((0..size).map(|_| pois.sample(rng) as u64).collect())
                }
                _ => {
                    let weights = self.pmf(params, domain, epsilon)?;
                    let index =
                        WeightedIndex::new(weights.iter().copied()).map_err(|e| {
                            Error::Computation(format!(
                                "{self}: cannot build weighted sampler: {e}"
                            ))
                        })?;
                    Ok((0..size).map(|_| index.sample(rng) as u64).collect())
                }
            },
        }
    }

    /// Log-likelihood of the data under this variant.
    ///
    /// With `nonzero_only` set, zero-valued observations are dropped before
    /// evaluation, which makes likelihoods comparable across kernels that
    /// can and cannot score zeros (the lognormal, Weibull and truncated
    /// power-law kernels are undefined at zero and never sum over it).
    /// Parameter points outside the kernel domain evaluate to `-inf` rather
    /// than an error so an unconstrained search can back out of them.
    pub fn log_likelihood(
        &self,
        params: &[f64],
        data: &[u64],
        nonzero_only: bool,
        epsilon: f64,
    ) -> Result<f64> {
        self.check_params(params)?;
        Ok(match self.resolve(params, epsilon) {
            Resolved::Delta(x0) => delta::log_likelihood(x0, data, epsilon),
            Resolved::Uniform => uniform::log_likelihood(data),
            Resolved::Invalid => f64::NEG_INFINITY,
            Resolved::Native => match self {
                DistributionKind::Delta => {
                    delta::log_likelihood(params[0], data, epsilon)
                }
                DistributionKind::Exponential => {
                    exponential::log_likelihood(params[0], data, nonzero_only)
                }
                DistributionKind::Lognormal => {
                    lognormal::log_likelihood(params[0], params[1], data, nonzero_only)
                }
                DistributionKind::Normal => {
                    normal::log_likelihood(params[0], params[1], data, nonzero_only)
                }
                DistributionKind::Poisson => {
                    poisson::log_likelihood(params[0], data, nonzero_only)
                }
                DistributionKind::ShiftedPowerLaw => shifted_power_law::log_likelihood(
                    params[0],
                    params[1],
                    data,
                    nonzero_only,
                ),
                DistributionKind::TruncatedPowerLaw => {
                    truncated_power_law::log_likelihood(params[0], params[1], data, nonzero_only)
                }
                DistributionKind::Uniform => uniform::log_likelihood(data),
                DistributionKind::Weibull => {
                    weibull::log_likelihood(params[0], params[1], data, nonzero_only)
                }
            },
        })
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DistributionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "delta" => Ok(DistributionKind::Delta),
            "exponential" => Ok(DistributionKind::Exponential),
            "lognormal" => Ok(DistributionKind::Lognormal),
            "normal" => Ok(DistributionKind::Normal),
            "poisson" => Ok(DistributionKind::Poisson),
            "shifted-power-law" => Ok(DistributionKind::ShiftedPowerLaw),
            "truncated-power-law" => Ok(DistributionKind::TruncatedPowerLaw),
            "uniform" => Ok(DistributionKind::Uniform),
            "weibull" => Ok(DistributionKind::Weibull),
            other => Err(Error::UnknownDistribution(other.to_string())),
        }
    }
}

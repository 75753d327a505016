//! Discrete probability kernels for count data.
//!
//! Each distribution lives in its own module as a set of free functions over
//! `f64` parameters; [`DistributionKind`] ties them together into a tagged
//! union with arity checking and a shared degenerate-substitution step.
//! [`empirical`] estimates pmf and cdf directly from observed samples.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod delta;
pub mod distributions;
pub mod empirical;
pub mod exponential;
pub mod lognormal;
pub mod math;
pub mod normal;
pub mod poisson;
pub mod shifted_power_law;
pub mod truncated_power_law;
pub mod uniform;
pub mod weibull;

pub use distributions::DistributionKind;

/// Threshold below which a parameter counts as degenerate.
pub const DEFAULT_EPSILON: f64 = 0.001;

/// Default upper bound of the evaluation domain for kernels without a
/// closed-form normalizer.
pub const DEFAULT_DOMAIN: usize = 10_000;

/// Default number of synthetic draws per sampling request.
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;

//! Error types for countfit

use thiserror::Error;

/// Countfit error type
#[derive(Error, Debug)]
pub enum Error {
    /// Empty sample, or a sample whose maximum cannot size a domain
    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    /// Requested distribution tag is absent from the registry
    #[error("Unknown distribution: {0}")]
    UnknownDistribution(String),

    /// Optimizer returned non-finite parameters or objective value
    #[error("Optimization diverged: {0}")]
    OptimizationDiverged(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

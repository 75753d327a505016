//! Uniform distribution over `[0, domain]`.
//!
//! Used as the substitute when a power-law exponent approaches zero and the
//! kernel flattens out.

use rand::Rng;

/// Flat pmf of length `domain + 1`.
pub fn pmf(domain: usize) -> Vec<f64> {
    vec![1.0 / (domain as f64 + 1.0); domain + 1]
}

/// Integer uniform draws over `0..=domain`.
pub fn sample<R: Rng + ?Sized>(size: usize, domain: usize, rng: &mut R) -> Vec<u64> {
    (0..size).map(|_| rng.gen_range(0..=domain as u64)).collect()
}

/// Log-likelihood of the uniform distribution: `-n * ln(max(data))`.
///
/// An all-zero sample is scored as a single-point domain to keep the value
/// finite.
pub fn log_likelihood(data: &[u64]) -> f64 {
    let max = data.iter().copied().max().unwrap_or(0).max(1);
    -(data.len() as f64) * (max as f64).ln()
}

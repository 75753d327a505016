//! Discrete normal (Gaussian) distribution kernel.
//!
//! `Normal(x) = C * exp(-(x - mu)^2 / (2*sigma^2))` over the non-negative
//! integers.

use crate::DEFAULT_DOMAIN;

fn kernel(x: f64, mu: f64, sigma: f64) -> f64 {
    (-0.5 * ((x - mu) / sigma).powi(2)).exp()
}

/// Probability mass function over `0..=domain`, normalized by the kernel sum.
///
/// Returns `None` when the kernel carries no mass on the domain.
pub fn pmf(mu: f64, sigma: f64, domain: usize) -> Option<Vec<f64>> {
    let mut p: Vec<f64> = (0..=domain).map(|x| kernel(x as f64, mu, sigma)).collect();
    let sum: f64 = p.iter().sum();
    if !(sum > 0.0) || !sum.is_finite() {
        return None;
    }
    for v in &mut p {
        *v /= sum;
    }
    Some(p)
}

/// Log-likelihood on the data.
///
/// The normalizer is the kernel sum over the fixed default domain.
pub fn log_likelihood(mu: f64, sigma: f64, data: &[u64], nonzero_only: bool) -> f64 {
    let used: Vec<f64> = data
        .iter()
        .copied()
        .filter(|&x| !nonzero_only || x > 0)
        .map(|x| x as f64)
        .collect();
    let c: f64 = (0..=DEFAULT_DOMAIN).map(|x| kernel(x as f64, mu, sigma)).sum();
    if !(c > 0.0) || !c.is_finite() {
        return f64::NEG_INFINITY;
    }
    let sq_sum: f64 = used.iter().map(|&x| (x - mu).powi(2)).sum();
    -sq_sum / (2.0 * sigma * sigma) - (used.len() as f64) * c.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pmf_normalized() {
        let p = pmf(10.0, 5.0, 10_000).unwrap();
        assert!(p.iter().all(|&v| v >= 0.0 && v.is_finite()));
        assert_relative_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pmf_peaks_at_mean() {
        let p = pmf(10.0, 2.0, 100).unwrap();
        let peak = p.iter().cloned().fold(f64::MIN, f64::max);
        assert_relative_eq!(p[10], peak, epsilon = 1e-15);
    }

    #[test]
    fn test_log_likelihood_matches_pmf() {
        let (mu, sigma) = (8.0, 3.0);
        let data = [5u64, 8, 10, 12, 7];
        let p = pmf(mu, sigma, DEFAULT_DOMAIN).unwrap();
        let exact: f64 = data.iter().map(|&x| p[x as usize].ln()).sum();
        assert_relative_eq!(log_likelihood(mu, sigma, &data, false), exact, epsilon = 1e-8);
    }
}

//! Discrete log-normal distribution kernel.
//!
//! `Lognormal(x) = C * exp(-(ln(x) - mu)^2 / (2*sigma^2)) / x` for `x >= 1`,
//! with zero mass at `x = 0`.

use crate::DEFAULT_DOMAIN;

fn kernel(x: f64, mu: f64, sigma: f64) -> f64 {
    (-0.5 * ((x.ln() - mu) / sigma).powi(2)).exp() / x
}

/// Probability mass function over `0..=domain`, normalized by the kernel sum.
///
/// Returns `None` when the kernel carries no mass on the domain (the
/// normalizer underflows to zero).
pub fn pmf(mu: f64, sigma: f64, domain: usize) -> Option<Vec<f64>> {
    let mut p: Vec<f64> = std::iter::once(0.0)
        .chain((1..=domain).map(|x| kernel(x as f64, mu, sigma)))
        .collect();
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
/// The kernel is undefined at zero, so zero-valued observations never enter
/// the data sums; `nonzero_only` additionally drops them from the
/// observation count multiplying the normalizer term. The normalizer is the
/// kernel sum over the fixed default domain.
pub fn log_likelihood(mu: f64, sigma: f64, data: &[u64], nonzero_only: bool) -> f64 {
    let nonzero: Vec<f64> =
        data.iter().copied().filter(|&x| x > 0).map(|x| x as f64).collect();
    let n = if nonzero_only { nonzero.len() } else { data.len() } as f64;
    let c: f64 = (1..=DEFAULT_DOMAIN).map(|x| kernel(x as f64, mu, sigma)).sum();
    if !(c > 0.0) || !c.is_finite() {
        return f64::NEG_INFINITY;
    }
    let ln_sum: f64 = nonzero.iter().map(|&x| x.ln()).sum();
    let sq_sum: f64 = nonzero.iter().map(|&x| (x.ln() - mu).powi(2)).sum();
    -ln_sum - sq_sum / (2.0 * sigma * sigma) - n * c.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pmf_normalized_and_zero_at_origin() {
        let p = pmf(1.9, 1.1, 10_000).unwrap();
        assert_eq!(p[0], 0.0);
        assert!(p.iter().all(|&v| v >= 0.0 && v.is_finite()));
        assert_relative_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pmf_empty_mass_is_none() {
        // Location far beyond the representable domain: kernel underflows.
        assert!(pmf(500.0, 0.01, 100).is_none());
    }

    #[test]
    fn test_log_likelihood_matches_pmf_on_nonzero_data() {
        let (mu, sigma) = (1.9, 1.1);
        let data = [1u64, 3, 9, 40, 7];
        let p = pmf(mu, sigma, DEFAULT_DOMAIN).unwrap();
        let exact: f64 = data.iter().map(|&x| p[x as usize].ln()).sum();
        assert_relative_eq!(log_likelihood(mu, sigma, &data, false), exact, epsilon = 1e-8);
    }

    #[test]
    fn test_nonzero_only_excludes_zeros_from_count() {
        let (mu, sigma) = (1.9, 1.1);
        let with_zeros = [0u64, 0, 3, 7];
        let without = [3u64, 7];
        assert_relative_eq!(
            log_likelihood(mu, sigma, &with_zeros, true),
            log_likelihood(mu, sigma, &without, false),
            epsilon = 1e-12
        );
        assert!(
            log_likelihood(mu, sigma, &with_zeros, false)
                != log_likelihood(mu, sigma, &with_zeros, true)
        );
    }
}

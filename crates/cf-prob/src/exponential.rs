//! Discrete exponential distribution kernel.
//!
//! `Exponential(x) = (1 - exp(-1/beta)) * exp(-x/beta)`

/// Probability mass function over `0..=domain`.
///
/// The geometric normalizer `1 - exp(-1/beta)` is exact on the full
/// non-negative integer support.
pub fn pmf(beta: f64, domain: usize) -> Vec<f64> {
    let c = 1.0 - (-1.0 / beta).exp();
    (0..=domain).map(|x| c * (-(x as f64) / beta).exp()).collect()
}

/// Log-likelihood: `n*ln(1 - exp(-1/beta)) - sum(x)/beta`.
pub fn log_likelihood(beta: f64, data: &[u64], nonzero_only: bool) -> f64 {
    let (n, sum) = if nonzero_only {
        let nz: Vec<f64> =
            data.iter().copied().filter(|&x| x > 0).map(|x| x as f64).collect();
        (nz.len() as f64, nz.iter().sum::<f64>())
    } else {
        (data.len() as f64, data.iter().map(|&x| x as f64).sum::<f64>())
    };
    n * (1.0 - (-1.0 / beta).exp()).ln() - sum / beta
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pmf_normalized() {
        let p = pmf(17.0, 10_000);
        assert!(p.iter().all(|&v| v >= 0.0 && v.is_finite()));
        assert_relative_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pmf_monotonically_decreasing() {
        let p = pmf(5.0, 100);
        assert!(p.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_log_likelihood_matches_pmf() {
        let beta = 17.0;
        let data = [1u64, 4, 9, 30, 2];
        let p = pmf(beta, 100);
        let exact: f64 = data.iter().map(|&x| p[x as usize].ln()).sum();
        assert_relative_eq!(log_likelihood(beta, &data, false), exact, epsilon = 1e-10);
    }

    #[test]
    fn test_nonzero_only_excludes_zeros() {
        let beta = 5.0;
        let with_zeros = [0u64, 0, 3, 7];
        let without = [3u64, 7];
        assert_relative_eq!(
            log_likelihood(beta, &with_zeros, true),
            log_likelihood(beta, &without, false),
            epsilon = 1e-12
        );
    }
}

//! Discrete Weibull distribution kernel.
//!
//! `Weibull(x) = C * x^(k-1) * exp(-(x/lambda)^k)` for `x >= 1`. At the
//! exponential limit `k = 1` the kernel value at `x = 0` is `1/lambda`.

use crate::DEFAULT_DOMAIN;

fn kernel(x: f64, k: f64, lambda: f64) -> f64 {
    // Log space: x^(k-1) alone can overflow while the product is tiny.
    ((k - 1.0) * x.ln() - (x / lambda).powf(k)).exp()
}

/// Whether `k` sits in the `[1, 1 + eps)` band where the kernel is given an
/// explicit value at `x = 0`.
fn exponential_limit(k: f64, epsilon: f64) -> bool {
    (0.0..epsilon).contains(&(k - 1.0))
}

/// Probability mass function over `0..=domain`, normalized by the kernel sum.
///
/// Returns `None` when the kernel carries no mass on the domain.
pub fn pmf(k: f64, lambda: f64, domain: usize, epsilon: f64) -> Option<Vec<f64>> {
    let head = if exponential_limit(k, epsilon) { 1.0 / lambda } else { 0.0 };
    let mut p: Vec<f64> = std::iter::once(head)
        .chain((1..=domain).map(|x| kernel(x as f64, k, lambda)))
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
/// `x^(k-1)` is undefined at zero for `k < 1`, so zero-valued observations
/// never enter the data sums; `nonzero_only` additionally drops them from
/// the observation count multiplying the normalizer term. The normalizer is
/// the kernel sum over the fixed default domain.
pub fn log_likelihood(k: f64, lambda: f64, data: &[u64], nonzero_only: bool) -> f64 {
    let nonzero: Vec<f64> =
        data.iter().copied().filter(|&x| x > 0).map(|x| x as f64).collect();
    let n = if nonzero_only { nonzero.len() } else { data.len() } as f64;
    let ln_sum: f64 = nonzero.iter().map(|&x| x.ln()).sum();
    let pow_sum: f64 = nonzero.iter().map(|&x| x.powf(k)).sum();
    let c: f64 = (1..=DEFAULT_DOMAIN).map(|x| kernel(x as f64, k, lambda)).sum();
    if !(c > 0.0) || !c.is_finite() {
        return f64::NEG_INFINITY;
    }
    (k - 1.0) * ln_sum - pow_sum / lambda.powf(k) - n * c.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pmf_normalized() {
        let p = pmf(0.5, 1.2, 10_000, 0.001).unwrap();
        assert_eq!(p[0], 0.0);
        assert!(p.iter().all(|&v| v >= 0.0 && v.is_finite()));
        assert_relative_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pmf_exponential_limit_mass_at_zero() {
        let p = pmf(1.0, 2.0, 10_000, 0.001).unwrap();
        assert!(p[0] > 0.0);
    }

    #[test]
    fn test_pmf_large_shape_stays_finite() {
        // x^(k-1) overflows on its own for large k; the log-space kernel must not.
        let p = pmf(50.0, 3.0, 1000, 0.001).unwrap();
        assert!(p.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_log_likelihood_matches_pmf_on_nonzero_data() {
        let (k, lambda) = (0.5, 1.2);
        let data = [1u64, 2, 5, 1, 3];
        let p = pmf(k, lambda, DEFAULT_DOMAIN, 0.001).unwrap();
        let exact: f64 = data.iter().map(|&x| p[x as usize].ln()).sum();
        assert_relative_eq!(log_likelihood(k, lambda, &data, false), exact, epsilon = 1e-8);
    }

    #[test]
    fn test_nonzero_only_excludes_zeros_from_count() {
        let (k, lambda) = (0.5, 1.2);
        let with_zeros = [0u64, 0, 2, 5];
        let without = [2u64, 5];
        assert_relative_eq!(
            log_likelihood(k, lambda, &with_zeros, true),
            log_likelihood(k, lambda, &without, false),
            epsilon = 1e-12
        );
    }
}

//! Truncated power-law (power-law with exponential cutoff) kernel.
//!
//! `TruncatedPowerLaw(x) = x^(-gamma) * exp(-x/kappa) / Li_gamma(exp(-1/kappa))`
//! for `x >= 1`, where `Li` is the polylogarithm.

use crate::math::polylog;

/// Kernel normalizer `Li_gamma(exp(-1/kappa))`.
pub fn normalizer(gamma: f64, kappa: f64) -> f64 {
    polylog(gamma, (-1.0 / kappa).exp())
}

/// Probability mass function over `0..=domain`, with zero mass at `x = 0`.
///
/// Returns `None` when the normalizer is unusable.
pub fn pmf(gamma: f64, kappa: f64, domain: usize) -> Option<Vec<f64>> {
    let c = normalizer(gamma, kappa);
    if !c.is_finite() || c <= 0.0 {
        return None;
    }
    Some(
        std::iter::once(0.0)
            .chain((1..=domain).map(|x| {
                let x = x as f64;
                x.powf(-gamma) * (-x / kappa).exp() / c
            }))
            .collect(),
    )
}

/// Log-likelihood on the data.
///
/// `x^(-gamma)` is undefined at zero, so zero-valued observations never
/// enter the data sums; `nonzero_only` additionally drops them from the
/// observation count multiplying the normalizer term.
pub fn log_likelihood(gamma: f64, kappa: f64, data: &[u64], nonzero_only: bool) -> f64 {
    let c = normalizer(gamma, kappa);
    if !c.is_finite() || c <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let nonzero: Vec<f64> =
        data.iter().copied().filter(|&x| x > 0).map(|x| x as f64).collect();
    let n = if nonzero_only { nonzero.len() } else { data.len() } as f64;
    let ln_sum: f64 = nonzero.iter().map(|&x| x.ln()).sum();
    let sum: f64 = nonzero.iter().sum();
    -gamma * ln_sum - sum / kappa - n * c.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pmf_normalized() {
        let p = pmf(2.3, 123.0, 10_000).unwrap();
        assert_eq!(p[0], 0.0);
        assert!(p.iter().all(|&v| v >= 0.0 && v.is_finite()));
        assert_relative_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normalizer_matches_direct_sum() {
        let (gamma, kappa) = (2.3, 123.0);
        let direct: f64 = (1..200_000)
            .map(|x| {
                let x = x as f64;
                x.powf(-gamma) * (-x / kappa).exp()
            })
            .sum();
        assert_relative_eq!(normalizer(gamma, kappa), direct, epsilon = 1e-10);
    }

    #[test]
    fn test_log_likelihood_matches_pmf_on_nonzero_data() {
        let (gamma, kappa) = (2.3, 123.0);
        let data = [1u64, 2, 9, 33, 4];
        let p = pmf(gamma, kappa, 10_000).unwrap();
        let exact: f64 = data.iter().map(|&x| p[x as usize].ln()).sum();
        assert_relative_eq!(log_likelihood(gamma, kappa, &data, false), exact, epsilon = 1e-8);
    }

    #[test]
    fn test_nonzero_only_excludes_zeros_from_count() {
        let (gamma, kappa) = (2.3, 123.0);
        let with_zeros = [0u64, 0, 2, 9];
        let without = [2u64, 9];
        assert_relative_eq!(
            log_likelihood(gamma, kappa, &with_zeros, true),
            log_likelihood(gamma, kappa, &without, false),
            epsilon = 1e-12
        );
    }
}

//! Poisson distribution kernel.
//!
//! `Poisson(x) = lambda^x * exp(-lambda) / x!`

use crate::math::{LN_2PI, ln_factorial_stirling};
use statrs::function::gamma::ln_gamma;

/// Probability mass function over `0..=domain`.
///
/// Evaluated in log space via `ln_gamma` so large counts stay finite.
pub fn pmf(lambda: f64, domain: usize) -> Vec<f64> {
    (0..=domain)
        .map(|x| {
            let x = x as f64;
            (x * lambda.ln() - lambda - ln_gamma(x + 1.0)).exp()
        })
        .collect()
}

/// Log-likelihood on integer count data.
///
/// `ln(x!)` is approximated by the Stirling series ([`ln_factorial_stirling`]);
/// the Stirling sums always run over the strictly positive observations,
/// while `nonzero_only` controls whether zero counts enter the remaining
/// terms.
pub fn log_likelihood(lambda: f64, data: &[u64], nonzero_only: bool) -> f64 {
    let nonzero: Vec<f64> =
        data.iter().copied().filter(|&x| x > 0).map(|x| x as f64).collect();
    let (n, sum) = if nonzero_only {
        (nonzero.len() as f64, nonzero.iter().sum::<f64>())
    } else {
        (data.len() as f64, data.iter().map(|&x| x as f64).sum::<f64>())
    };
    let ln_factorials: f64 = nonzero.iter().map(|&x| ln_factorial_stirling(x)).sum();
    sum * lambda.ln() - n * lambda - 0.5 * (n - nonzero.len() as f64) * LN_2PI
        - ln_factorials
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pmf_normalized() {
        let p = pmf(3.4, 1000);
        assert!(p.iter().all(|&v| v >= 0.0 && v.is_finite()));
        assert_relative_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pmf_known_value() {
        // P(X=0) = exp(-lambda).
        let p = pmf(2.0, 10);
        assert_relative_eq!(p[0], (-2.0_f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(p[1], 2.0 * (-2.0_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_log_likelihood_matches_pmf_on_nonzero_data() {
        let data = [1u64, 2, 3, 4, 2, 7];
        let lambda = 3.4;
        let p = pmf(lambda, 100);
        let exact: f64 = data.iter().map(|&x| p[x as usize].ln()).sum();
        let approx_ll = log_likelihood(lambda, &data, true);
        // Stirling error is ~2e-3 per observation at x=1.
        assert_relative_eq!(approx_ll, exact, epsilon = 2e-2);
    }

    #[test]
    fn test_log_likelihood_maximized_near_mean() {
        let data = [3u64, 4, 3, 4, 3, 4];
        let at_mean = log_likelihood(3.5, &data, false);
        assert!(at_mean > log_likelihood(2.0, &data, false));
        assert!(at_mean > log_likelihood(5.0, &data, false));
    }
}

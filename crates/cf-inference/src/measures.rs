//! Goodness-of-fit and model-comparison measures.

/// Kolmogorov-Smirnov statistic: largest absolute gap between two cdfs.
///
/// The curves may cover different supports; the shorter one is padded with
/// 1.0, since a cdf stays saturated past the end of its support.
pub fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(1.0);
            let y = b.get(i).copied().unwrap_or(1.0);
            (x - y).abs()
        })
        .fold(0.0, f64::max)
}

/// Akaike information criterion: `-2 * (ll - k)`.
pub fn aic(log_likelihood: f64, n_params: usize) -> f64 {
    -2.0 * (log_likelihood - n_params as f64)
}

/// Bayesian information criterion: `-2 * ll + k * ln(n)`.
pub fn bic(log_likelihood: f64, n_params: usize, n_obs: usize) -> f64 {
    -2.0 * log_likelihood + n_params as f64 * (n_obs as f64).ln()
}

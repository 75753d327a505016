//! Shifted power-law distribution kernel.
//!
//! `ShiftedPowerLaw(x) = (x + x0)^(-gamma) / zeta(gamma, x0)`, where `zeta`
//! is the Hurwitz zeta function.

use crate::math::hurwitz_zeta;

/// Kernel normalizer `zeta(gamma, x0)`.
///
/// NaN when `x0 <= 0` or the arguments are non-finite; the caller decides
/// whether that triggers substitution or an invalid-parameter path.
pub fn normalizer(gamma: f64, x0: f64) -> f64 {
    hurwitz_zeta(gamma, x0)
}

/// Probability mass function over `0..=domain`.
///
/// Returns `None` when the normalizer is unusable.
pub fn pmf(gamma: f64, x0: f64, domain: usize) -> Option<Vec<f64>> {
    let c = normalizer(gamma, x0);
    if !c.is_finite() || c <= 0.0 {
        return None;
    }
    Some((0..=domain).map(|x| (x as f64 + x0).powf(-gamma) / c).collect())
}

/// Log-likelihood: `-gamma * sum(ln(x + x0)) - n * ln(zeta(gamma, x0))`.
pub fn log_likelihood(gamma: f64, x0: f64, data: &[u64], nonzero_only: bool) -> f64 {
    let c = normalizer(gamma, x0);
    if !c.is_finite() || c <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let used: Vec<f64> = data
        .iter()
        .copied()
        .filter(|&x| !nonzero_only || x > 0)
        .map(|x| x as f64)
        .collect();
    let ln_sum: f64 = used.iter().map(|&x| (x + x0).ln()).sum();
    -gamma * ln_sum - (used.len() as f64) * c.ln()
}

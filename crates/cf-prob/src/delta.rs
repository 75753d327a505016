//! Dirac delta distribution.
//!
//! Used as the substitute when another variant's parameters approach a
//! boundary where its kernel becomes unstable or undefined.

use std::f64::consts::PI;

/// Point-mass pmf at `floor(x0)`, clamped into `[0, domain]`.
pub fn pmf(x0: f64, domain: usize) -> Vec<f64> {
    let idx = (x0.floor().max(0.0) as usize).min(domain);
    let mut p = vec![0.0; domain + 1];
    p[idx] = 1.0;
    p
}

/// Constant sample at `floor(x0)`.
pub fn sample(x0: f64, size: usize) -> Vec<u64> {
    vec![x0.floor().max(0.0) as u64; size]
}

/// Log-likelihood of the delta distribution.
///
/// A true indicator would make the objective flat almost everywhere, so the
/// point mass is approximated by a narrow Gaussian with standard deviation
/// `epsilon`, keeping the surface smooth for the simplex search.
pub fn log_likelihood(x0: f64, data: &[u64], epsilon: f64) -> f64 {
    let n = data.len() as f64;
    let ss: f64 = data.iter().map(|&x| (x as f64 - x0).powi(2)).sum();
    -n * (epsilon * (2.0 * PI).sqrt()).ln() - ss / (2.0 * epsilon * epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pmf_point_mass() {
        let p = pmf(3.0, 10);
        assert_eq!(p.len(), 11);
        assert_eq!(p[3], 1.0);
        assert_eq!(p.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_pmf_location_clamped() {
        let p = pmf(99.0, 10);
        assert_eq!(p[10], 1.0);
        let p = pmf(-2.0, 10);
        assert_eq!(p[0], 1.0);
    }

    #[test]
    fn test_sample_is_constant() {
        assert_eq!(sample(4.7, 3), vec![4, 4, 4]);
    }

    #[test]
    fn test_log_likelihood_peaks_at_location() {
        let data = [2u64, 2, 2];
        let at_loc = log_likelihood(2.0, &data, 0.001);
        let off_loc = log_likelihood(3.0, &data, 0.001);
        assert!(at_loc > off_loc);
    }
}

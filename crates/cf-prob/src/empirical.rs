//! Empirical pmf and cdf estimation from observed count samples.

use cf_core::{Error, Result};

/// Largest observed value.
///
/// Errors on an empty sample and on an all-zero sample, both of which leave
/// no support to estimate a distribution on.
pub fn sample_max(data: &[u64]) -> Result<u64> {
    let max = data
        .iter()
        .copied()
        .max()
        .ok_or_else(|| Error::InvalidSample("empty sample".to_string()))?;
    if max == 0 {
        return Err(Error::InvalidSample(
            "all observations are zero".to_string(),
        ));
    }
    Ok(max)
}

/// Relative frequencies over `0..=max(data)`.
pub fn sample_pmf(data: &[u64]) -> Result<Vec<f64>> {
    let max = sample_max(data)?;
    let mut counts = vec![0u64; max as usize + 1];
    for &x in data {
        counts[x as usize] += 1;
    }
    let n = data.len() as f64;
    Ok(counts.into_iter().map(|c| c as f64 / n).collect())
}

/// Empirical cumulative distribution: prefix sum of [`sample_pmf`].
pub fn sample_cdf(data: &[u64]) -> Result<Vec<f64>> {
    let mut acc = 0.0;
    Ok(sample_pmf(data)?
        .into_iter()
        .map(|p| {
            acc += p;
            acc
        })
        .collect())
}

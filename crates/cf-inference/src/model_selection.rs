//! Fitting a set of candidate variants and picking the best one.
//!
//! Every candidate is fitted independently (in parallel), scored under the
//! configured criterion, and ranked. Information criteria come with Akaike
//! weights; the distance criterion comes with bootstrap p-values instead.

use cf_core::{Error, FitResult, Result};
use cf_prob::{DistributionKind, empirical};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fit::{FitConfig, fit_by_ks, fit_by_likelihood};
use crate::measures::{aic, bic, ks_statistic};

/// Criterion used to score and rank fitted candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMethod {
    /// Akaike information criterion over maximum-likelihood fits.
    Aic,
    /// Bayesian information criterion over maximum-likelihood fits.
    Bic,
    /// Kolmogorov-Smirnov statistic over distance fits.
    Ks,
}

/// Configuration of a model-selection run.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Scoring criterion.
    pub method: SelectionMethod,
    /// Candidate variants to fit.
    pub candidates: Vec<DistributionKind>,
    /// Per-candidate fitting settings.
    pub fit: FitConfig,
    /// Synthetic samples per candidate when bootstrapping p-values.
    pub bootstrap_trials: usize,
    /// Base seed for bootstrap reproducibility.
    pub seed: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            method: SelectionMethod::Aic,
            candidates: DistributionKind::CANDIDATES.to_vec(),
            fit: FitConfig::default(),
            bootstrap_trials: 100,
            seed: 0,
        }
    }
}

/// One fitted and scored candidate.
#[derive(Debug, Clone, Serialize)]
pub struct VariantScore {
    /// The candidate variant.
    pub kind: DistributionKind,
    /// Its fitted parameters and measures.
    pub fit: FitResult,
    /// Printable parameter description.
    pub description: String,
    /// Criterion value (lower is better).
    pub score: f64,
    /// Score gap to the best candidate.
    pub delta: f64,
    /// Akaike weight; present for information criteria only.
    pub weight: Option<f64>,
    /// Bootstrap p-value; present for the distance criterion only.
    pub p_value: Option<f64>,
}

/// Observed and fitted probability masses tabulated over the sample support.
#[derive(Debug, Clone, Serialize)]
pub struct PmfTable {
    /// Support values `0..=max(data)`.
    pub values: Vec<u64>,
    /// Empirical relative frequencies.
    pub observed: Vec<f64>,
    /// Candidate order of the `fitted` rows.
    pub candidates: Vec<DistributionKind>,
    /// Fitted pmf per candidate, each aligned with `values`.
    pub fitted: Vec<Vec<f64>>,
}

/// Full outcome of a model-selection run.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSelectionReport {
    /// Criterion the scores were computed under.
    pub method: SelectionMethod,
    /// Scored candidates in registry order.
    pub scores: Vec<VariantScore>,
    /// The winning variant (lowest score; earliest on ties).
    pub best: DistributionKind,
    /// Observed and fitted pmfs over the sample support.
    pub pmf_table: PmfTable,
}

impl ModelSelectionReport {
    /// Scores sorted best-first.
    pub fn ranked(&self) -> Vec<&VariantScore> {
        let mut out: Vec<&VariantScore> = self.scores.iter().collect();
        out.sort_by(|a, b| a.score.total_cmp(&b.score));
        out
    }

    /// The score entry of the winning variant.
    pub fn best_score(&self) -> &VariantScore {
        // `best` is always taken from `scores`, so the lookup cannot miss.
        self.scores.iter().find(|s| s.kind == self.best).unwrap_or(&self.scores[0])
    }
}

/// Empirical cdf of a synthetic sample, tolerating the all-zero draw a
/// near-degenerate fit can produce.
fn synthetic_cdf(sample: &[u64]) -> Vec<f64> {
    empirical::sample_cdf(sample).unwrap_or_else(|_| vec![1.0])
}

/// Bootstrap p-value for one fitted candidate: the fraction of synthetic
/// samples drawn from the fitted model whose distance to that model exceeds
/// the observed distance.
fn bootstrap_p_value(
    kind: DistributionKind,
    fit: &FitResult,
    n_obs: usize,
    observed_d: f64,
    config: &SelectionConfig,
) -> Result<f64> {
    let exceeded = (0..config.bootstrap_trials)
        .into_par_iter()
        .map(|trial| -> Result<usize> {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(trial as u64));
            let sample = kind.sample(
                &fit.params,
                n_obs,
                config.fit.domain,
                config.fit.epsilon,
                &mut rng,
            )?;
            let sample_cdf = synthetic_cdf(&sample);
            let domain = (sample_cdf.len() - 1).min(config.fit.domain);
            let model_cdf = kind.cdf(&fit.params, domain, config.fit.epsilon)?;
            let d = ks_statistic(&sample_cdf, &model_cdf);
            Ok(usize::from(d > observed_d))
        })
        .sum::<Result<usize>>()?;
    Ok(exceeded as f64 / config.bootstrap_trials as f64)
}

/// Fit all candidates, score them under the configured criterion and pick
/// the winner.
///
/// Any candidate whose fit fails aborts the run; a partial comparison would
/// silently change what "best" means.
pub fn select_model(data: &[u64], config: &SelectionConfig) -> Result<ModelSelectionReport> {
    if config.candidates.is_empty() {
        return Err(Error::Validation("no candidate variants given".to_string()));
    }
    if config.method == SelectionMethod::Ks && config.bootstrap_trials == 0 {
        return Err(Error::Validation(
            "bootstrap_trials must be positive for KS selection".to_string(),
        ));
    }
    let max = empirical::sample_max(data)? as usize;
    let observed = empirical::sample_pmf(data)?;

    let fits: Vec<FitResult> = config
        .candidates
        .par_iter()
        .map(|&kind| match config.method {
            SelectionMethod::Aic | SelectionMethod::Bic => {
                fit_by_likelihood(kind, data, &config.fit)
            }
            SelectionMethod::Ks => fit_by_ks(kind, data, &config.fit),
        })
        .collect::<Result<_>>()?;

    // Information criteria compare candidates on the observations every
    // kernel can score: the criterion likelihood drops zero counts, even
    // though the fits themselves kept them. Kernels that sum over zeros
    // would otherwise carry a penalty the zero-excluding kernels never pay.
    let scoring_ll = |kind: DistributionKind, fit: &FitResult| {
        kind.log_likelihood(&fit.params, data, true, config.fit.epsilon)
    };
    let mut raw_scores = Vec::with_capacity(fits.len());
    for (&kind, fit) in config.candidates.iter().zip(&fits) {
        raw_scores.push(match config.method {
            SelectionMethod::Aic => aic(scoring_ll(kind, fit)?, kind.arity()),
            SelectionMethod::Bic => bic(scoring_ll(kind, fit)?, kind.arity(), data.len()),
            SelectionMethod::Ks => fit.ks_statistic,
        });
    }

    let best_score = raw_scores.iter().copied().fold(f64::INFINITY, f64::min);

    // Akaike weights normalize exp(-delta/2) over the candidate set.
    let weights: Option<Vec<f64>> = match config.method {
        SelectionMethod::Aic | SelectionMethod::Bic => {
            let rel: Vec<f64> =
                raw_scores.iter().map(|s| (-0.5 * (s - best_score)).exp()).collect();
            let total: f64 = rel.iter().sum();
            Some(rel.iter().map(|r| r / total).collect())
        }
        SelectionMethod::Ks => None,
    };

    let mut scores = Vec::with_capacity(config.candidates.len());
    for (i, (&kind, fit)) in config.candidates.iter().zip(&fits).enumerate() {
        let p_value = match config.method {
            SelectionMethod::Ks => Some(bootstrap_p_value(
                kind,
                fit,
                data.len(),
                fit.ks_statistic,
                config,
            )?),
            _ => None,
        };
        scores.push(VariantScore {
            kind,
            description: kind.describe(&fit.params)?,
            fit: fit.clone(),
            score: raw_scores[i],
            delta: raw_scores[i] - best_score,
            weight: weights.as_ref().map(|w| w[i]),
            p_value,
        });
    }

    // First strictly-smallest score wins; ties keep the earlier candidate.
    let mut best = scores[0].kind;
    let mut best_seen = scores[0].score;
    for s in &scores[1..] {
        if s.score < best_seen {
            best_seen = s.score;
            best = s.kind;
        }
    }
    log::debug!("selected {best} out of {} candidates", config.candidates.len());

    let fitted = config
        .candidates
        .iter()
        .zip(&fits)
        .map(|(&kind, fit)| kind.pmf(&fit.params, max, config.fit.epsilon))
        .collect::<Result<Vec<_>>>()?;
    let pmf_table = PmfTable {
        values: (0..=max as u64).collect(),
        observed,
        candidates: config.candidates.clone(),
        fitted,
    };

    Ok(ModelSelectionReport { method: config.method, scores, best, pmf_table })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_prob::{DEFAULT_DOMAIN, DEFAULT_EPSILON};

    fn poisson_sample(lambda: f64, n: usize, seed: u64) -> Vec<u64> {
        let mut rng = StdRng::seed_from_u64(seed);
        DistributionKind::Poisson
            .sample(&[lambda], n, DEFAULT_DOMAIN, DEFAULT_EPSILON, &mut rng)
            .unwrap()
    }

    fn small_config(method: SelectionMethod) -> SelectionConfig {
        SelectionConfig {
            method,
            candidates: vec![
                DistributionKind::Exponential,
                DistributionKind::Normal,
                DistributionKind::Poisson,
            ],
            bootstrap_trials: 20,
            ..Default::default()
        }
    }

    #[test]
    fn test_aic_prefers_poisson_on_poisson_data() {
        let data = poisson_sample(3.4, 3000, 21);
        let report = select_model(&data, &small_config(SelectionMethod::Aic)).unwrap();
        assert_eq!(report.best, DistributionKind::Poisson);
        assert_eq!(report.ranked()[0].kind, DistributionKind::Poisson);
        assert_eq!(report.best_score().delta, 0.0);
    }

    #[test]
    fn test_akaike_weights_sum_to_one() {
        let data = poisson_sample(2.5, 1000, 22);
        for method in [SelectionMethod::Aic, SelectionMethod::Bic] {
            let report = select_model(&data, &small_config(method)).unwrap();
            let total: f64 = report.scores.iter().map(|s| s.weight.unwrap()).sum();
            assert!((total - 1.0).abs() < 1e-9, "{total}");
            assert!(report.scores.iter().all(|s| s.p_value.is_none()));
        }
    }

    #[test]
    fn test_ks_selection_has_p_values_in_unit_interval() {
        let data = poisson_sample(3.0, 500, 23);
        let report = select_model(&data, &small_config(SelectionMethod::Ks)).unwrap();
        for s in &report.scores {
            let p = s.p_value.unwrap();
            assert!((0.0..=1.0).contains(&p), "{}: p = {p}", s.kind);
            assert!(s.weight.is_none());
        }
        // A correctly specified model should not look like an outlier to its
        // own bootstrap.
        let best = report.best_score();
        assert!(best.p_value.unwrap() > 0.0);
    }

    #[test]
    fn test_pmf_table_aligned_with_support() {
        let data = poisson_sample(3.0, 500, 24);
        let report = select_model(&data, &small_config(SelectionMethod::Aic)).unwrap();
        let table = &report.pmf_table;
        let len = table.values.len();
        assert_eq!(table.observed.len(), len);
        assert_eq!(table.fitted.len(), table.candidates.len());
        assert!(table.fitted.iter().all(|row| row.len() == len));
        assert_eq!(table.values[0], 0);
        assert_eq!(*table.values.last().unwrap() as usize, len - 1);
    }

    #[test]
    fn test_report_serializes() {
        let data = poisson_sample(2.0, 300, 25);
        let report = select_model(&data, &small_config(SelectionMethod::Aic)).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"poisson\""));
        assert!(json.contains("\"aic\""));
    }

    #[test]
    fn test_bootstrap_reproducible() {
        let data = poisson_sample(3.0, 400, 26);
        let cfg = small_config(SelectionMethod::Ks);
        let r1 = select_model(&data, &cfg).unwrap();
        let r2 = select_model(&data, &cfg).unwrap();
        for (a, b) in r1.scores.iter().zip(&r2.scores) {
            assert_eq!(a.p_value, b.p_value);
            assert_eq!(a.fit.params, b.fit.params);
        }
    }

    #[test]
    fn test_empty_candidate_set_rejected() {
        let cfg = SelectionConfig { candidates: vec![], ..Default::default() };
        assert!(select_model(&[1, 2, 3], &cfg).is_err());
    }

    #[test]
    fn test_ks_with_zero_bootstrap_trials_rejected() {
        let cfg = SelectionConfig {
            method: SelectionMethod::Ks,
            bootstrap_trials: 0,
            ..Default::default()
        };
        assert!(select_model(&[1, 2, 3], &cfg).is_err());
    }

    #[test]
    fn test_criteria_score_zero_excluded_likelihood() {
        // A third of the draws are zero at this rate; the criterion must be
        // computed from the likelihood of the nonzero observations, not
        // from the fitted objective value.
        let data = poisson_sample(1.2, 500, 27);
        assert!(data.iter().any(|&x| x == 0));
        let cfg = SelectionConfig {
            candidates: vec![DistributionKind::Poisson],
            ..Default::default()
        };
        let report = select_model(&data, &cfg).unwrap();
        let entry = &report.scores[0];
        let ll_nonzero = DistributionKind::Poisson
            .log_likelihood(&entry.fit.params, &data, true, cfg.fit.epsilon)
            .unwrap();
        assert_eq!(entry.score, aic(ll_nonzero, 1));
        assert!(entry.score != aic(entry.fit.log_likelihood, 1));
    }
}

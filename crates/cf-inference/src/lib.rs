//! Parameter fitting and model selection for count data.
//!
//! [`fit`] estimates the parameters of a single distribution variant by
//! maximum likelihood or by minimizing the Kolmogorov-Smirnov distance;
//! [`model_selection`] runs a set of candidates through a fit, scores them
//! under AIC, BIC or the KS statistic, and picks the best one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fit;
pub mod measures;
pub mod model_selection;
pub mod optimizer;

pub use fit::{FitConfig, fit_by_ks, fit_by_likelihood};
pub use measures::{aic, bic, ks_statistic};
pub use model_selection::{
    ModelSelectionReport, PmfTable, SelectionConfig, SelectionMethod, VariantScore, select_model,
};
pub use optimizer::{ObjectiveFunction, OptimizationResult, OptimizerConfig, SimplexOptimizer};

//! Optimization algorithms
//!
//! This module wraps the argmin Nelder-Mead solver behind a clean interface.
//! The search is unconstrained and derivative-free; objectives signal
//! out-of-domain regions by evaluating to `+inf` instead of erroring out.

use argmin::core::{CostFunction, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;
use cf_core::Result;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Configuration for the Nelder-Mead optimizer
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Maximum number of iterations
    pub max_iter: u64,
    /// Convergence tolerance on the standard deviation of the simplex costs
    pub sd_tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self { max_iter: u64::MAX, sd_tolerance: 1e-4 }
    }
}

/// Result of optimization
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best-fit parameters
    pub parameters: Vec<f64>,
    /// Function value at minimum
    pub fval: f64,
    /// Number of iterations
    pub n_iter: u64,
    /// Number of objective (cost) evaluations.
    pub n_fev: usize,
    /// Convergence status
    pub converged: bool,
    /// Termination message
    pub message: String,
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OptimizationResult(fval={:.6}, n_iter={}, n_fev={}, converged={})",
            self.fval, self.n_iter, self.n_fev, self.converged
        )
    }
}

/// Objective function trait for optimization
pub trait ObjectiveFunction: Send + Sync {
    /// Evaluate function at given parameters
    fn eval(&self, params: &[f64]) -> Result<f64>;
}

/// Wrapper to make ObjectiveFunction compatible with argmin
struct ArgminProblem<'a> {
    objective: &'a dyn ObjectiveFunction,
    counts: Arc<FuncCounts>,
}

#[derive(Default)]
struct FuncCounts {
    cost: AtomicUsize,
}

impl<'a> CostFunction for ArgminProblem<'a> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
        self.counts.cost.fetch_add(1, Ordering::Relaxed);
        let fval =
            self.objective.eval(params).map_err(|e| argmin::core::Error::msg(e.to_string()))?;
        // NaN would poison the simplex ordering; treat it like any other
        // out-of-domain point.
        Ok(if fval.is_nan() { f64::INFINITY } else { fval })
    }
}

/// Build the initial simplex around a starting point: the point itself plus
/// one vertex per coordinate, perturbed by 5% of that coordinate (a small
/// absolute step when the coordinate is zero).
fn initial_simplex(init_params: &[f64]) -> Vec<Vec<f64>> {
    let mut simplex = vec![init_params.to_vec()];
    for i in 0..init_params.len() {
        let mut vertex = init_params.to_vec();
        vertex[i] += if vertex[i] != 0.0 { 0.05 * vertex[i] } else { 0.00025 };
        simplex.push(vertex);
    }
    simplex
}

/// Derivative-free Nelder-Mead simplex optimizer
pub struct SimplexOptimizer {
    config: OptimizerConfig,
}

impl SimplexOptimizer {
    /// Create new simplex optimizer with given configuration
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Minimize objective function starting from `init_params`
    pub fn minimize(
        &self,
        objective: &dyn ObjectiveFunction,
        init_params: &[f64],
    ) -> Result<OptimizationResult> {
        if init_params.is_empty() {
            return Err(cf_core::Error::Validation(
                "Cannot optimize over an empty parameter vector".to_string(),
            ));
        }

        let counts = Arc::new(FuncCounts::default());
        let problem = ArgminProblem { objective, counts: counts.clone() };

        let solver = NelderMead::new(initial_simplex(init_params))
            .with_sd_tolerance(self.config.sd_tolerance)
            .map_err(|e| {
                cf_core::Error::Validation(format!("Invalid optimizer configuration (sd_tol): {e}"))
            })?;

        let res = Executor::new(problem, solver)
            .configure(|state| state.max_iters(self.config.max_iter))
            .run()
            .map_err(|e| cf_core::Error::OptimizationDiverged(format!("Optimization failed: {e}")))?;

        let state = res.state();
        let parameters = state
            .get_best_param()
            .ok_or_else(|| {
                cf_core::Error::OptimizationDiverged("No best parameters found".to_string())
            })?
            .clone();
        let fval = state.get_best_cost();
        let n_iter = state.get_iter();
        let n_fev = counts.cost.load(Ordering::Relaxed);

        let termination = state.get_termination_status();
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
                | TerminationStatus::Terminated(TerminationReason::TargetCostReached)
        );
        let message = termination.to_string();

        Ok(OptimizationResult { parameters, fval, n_iter, n_fev, converged, message })
    }
}

impl Default for SimplexOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

//! Newton-Raphson IRR solver

use log::{debug, warn};

use crate::cashflow::CashFlowSeries;
use crate::solver::error::IrrError;

/// Default starting estimate (10% periodic rate)
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;

/// Default step-size convergence tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default iteration budget
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Configuration for the Newton-Raphson iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Starting rate estimate
    pub initial_guess: f64,
    /// Convergence criterion on the step size between successive estimates
    pub tolerance: f64,
    /// Iteration budget before giving up
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    pub fn new(initial_guess: f64, tolerance: f64, max_iterations: u32) -> Self {
        Self {
            initial_guess,
            tolerance,
            max_iterations,
        }
    }

    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Newton-Raphson driver for the IRR of a cash flow series
///
/// Repeatedly evaluates the series NPV and its derivative at successive rate
/// estimates until the step size falls below the tolerance, the iteration
/// becomes degenerate, or the budget is exhausted. The series is read-only
/// during solving; concurrent solves over the same series are safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct IrrSolver {
    config: SolverConfig,
}

impl IrrSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for the periodic rate at which the series NPV is zero
    ///
    /// Returns the converged rate, or an [`IrrError`] describing why the
    /// iteration stopped. Deterministic: the same series and configuration
    /// always produce bit-identical results.
    pub fn solve(&self, series: &CashFlowSeries) -> Result<f64, IrrError> {
        let mut rate = self.config.initial_guess;

        for iteration in 1..=self.config.max_iterations {
            let f = series.npv(rate);

            // The degeneracy guard tests the NPV value, not the derivative:
            // a residual already below machine epsilon leaves no meaningful
            // Newton step to take. An empty series trips this immediately.
            if f.abs() < f64::EPSILON {
                warn!(
                    "NPV numerically zero at rate {} on iteration {}; aborting",
                    rate, iteration
                );
                return Err(IrrError::DegenerateDerivative { rate, iteration });
            }

            let f_prime = series.npv_derivative(rate);
            let next_rate = rate - f / f_prime;

            if (next_rate - rate).abs() < self.config.tolerance {
                debug!("converged to rate {} after {} iterations", next_rate, iteration);
                return Ok(next_rate);
            }

            rate = next_rate;
        }

        warn!(
            "no convergence after {} iterations; last estimate {}",
            self.config.max_iterations, rate
        );
        Err(IrrError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last_rate: rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn simple_series() -> CashFlowSeries {
        // -100 now, 110 in one period: IRR is exactly 10%
        CashFlowSeries::from(vec![(0, -100.0), (1, 110.0)])
    }

    #[test]
    fn test_single_cash_flow_round_trip() {
        let rate = IrrSolver::default().solve(&simple_series()).unwrap();
        assert_relative_eq!(rate, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_converges_from_distant_guess() {
        let solver = IrrSolver::new(SolverConfig::default().with_initial_guess(0.50));
        let rate = solver.solve(&simple_series()).unwrap();
        assert_relative_eq!(rate, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_multi_period_investment() {
        // -1000 then 500/500/500: IRR near 23.375%
        let series = CashFlowSeries::from(vec![(0, -1000.0), (1, 500.0), (2, 500.0), (3, 500.0)]);
        let rate = IrrSolver::default().solve(&series).unwrap();
        assert_relative_eq!(series.npv(rate), 0.0, epsilon = 1e-6);
        assert!(rate > 0.23 && rate < 0.24, "unexpected IRR {}", rate);
    }

    #[test]
    fn test_empty_series_degenerates_on_first_iteration() {
        let err = IrrSolver::default().solve(&CashFlowSeries::new()).unwrap_err();
        match err {
            IrrError::DegenerateDerivative { iteration, .. } => assert_eq!(iteration, 1),
            other => panic!("expected DegenerateDerivative, got {:?}", other),
        }
        assert_eq!(err.partial_rate(), None);
    }

    #[test]
    fn test_zero_sum_series_degenerates_at_rate_zero_guess() {
        // Amounts summing to zero make NPV(0) exactly zero, so a guess of
        // zero trips the degeneracy guard before any step is taken.
        let series = CashFlowSeries::from(vec![(0, -50.0), (1, 20.0), (2, 30.0)]);
        let solver = IrrSolver::new(SolverConfig::default().with_initial_guess(0.0));
        let err = solver.solve(&series).unwrap_err();
        assert!(matches!(
            err,
            IrrError::DegenerateDerivative { iteration: 1, .. }
        ));
    }

    #[test]
    fn test_all_positive_series_exhausts_budget() {
        let series = CashFlowSeries::from(vec![(0, 100.0), (1, 110.0), (2, 120.0)]);
        let err = IrrSolver::default().solve(&series).unwrap_err();
        match err {
            IrrError::MaxIterationsExceeded { iterations, .. } => {
                assert_eq!(iterations, DEFAULT_MAX_ITERATIONS)
            }
            other => panic!("expected MaxIterationsExceeded, got {:?}", other),
        }
        assert!(err.partial_rate().is_some());
    }

    #[test]
    fn test_all_negative_series_exhausts_budget() {
        let series = CashFlowSeries::from(vec![(0, -100.0), (1, -110.0)]);
        let err = IrrSolver::default().solve(&series).unwrap_err();
        assert!(matches!(err, IrrError::MaxIterationsExceeded { .. }));
    }

    #[test]
    fn test_deterministic_results() {
        let series = CashFlowSeries::from(vec![(0, -1000.0), (1, 300.0), (2, 400.0), (3, 500.0)]);
        let solver = IrrSolver::default();
        let first = solver.solve(&series).unwrap();
        let second = solver.solve(&series).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_tighter_tolerance_stays_near_root() {
        let series = simple_series();
        let loose = IrrSolver::new(SolverConfig::default().with_tolerance(1e-4))
            .solve(&series)
            .unwrap();
        let tight = IrrSolver::new(SolverConfig::default().with_tolerance(1e-9))
            .solve(&series)
            .unwrap();
        assert_relative_eq!(loose, 0.10, epsilon = 1e-3);
        assert_relative_eq!(tight, 0.10, epsilon = 1e-8);
    }

    #[test]
    fn test_series_irr_convenience() {
        let rate = simple_series().irr().unwrap();
        assert_relative_eq!(rate, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_solver_config_builders() {
        let config = SolverConfig::default()
            .with_initial_guess(0.05)
            .with_tolerance(1e-8)
            .with_max_iterations(250);
        assert_relative_eq!(config.initial_guess, 0.05);
        assert_relative_eq!(config.tolerance, 1e-8);
        assert_eq!(config.max_iterations, 250);
    }

    #[test]
    fn test_solve_does_not_mutate_series() {
        let series = simple_series();
        let before = series.clone();
        let _ = IrrSolver::default().solve(&series);
        assert_eq!(series, before);
    }
}

//! Solver failure types

use thiserror::Error;

/// Failure modes of the Newton-Raphson IRR iteration
///
/// Both variants are ordinary results, not panics; the caller inspects the
/// variant before using any rate. Neither failure leaves the series in a
/// modified state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IrrError {
    /// The NPV value at the current estimate is numerically zero, so the
    /// Newton step cannot safely proceed. No usable rate is produced; a
    /// retry with a different initial guess may succeed.
    #[error("NPV numerically zero at rate {rate} (iteration {iteration}); cannot take a Newton step")]
    DegenerateDerivative { rate: f64, iteration: u32 },

    /// The step-size tolerance was never met within the iteration budget.
    /// Carries the last rate estimate as a diagnostic, not a guaranteed
    /// answer.
    #[error("no convergence after {iterations} iterations (last estimate {last_rate})")]
    MaxIterationsExceeded { iterations: u32, last_rate: f64 },
}

impl IrrError {
    /// Best-effort rate estimate, where one exists
    ///
    /// `MaxIterationsExceeded` yields its last estimate;
    /// `DegenerateDerivative` yields nothing.
    pub fn partial_rate(&self) -> Option<f64> {
        match self {
            IrrError::DegenerateDerivative { .. } => None,
            IrrError::MaxIterationsExceeded { last_rate, .. } => Some(*last_rate),
        }
    }
}

//! IRR Engine - Internal rate of return for periodic cash flow series
//!
//! This library provides:
//! - Cash flow series construction with NPV and NPV-derivative evaluation
//! - Newton-Raphson IRR solving with explicit non-convergence handling
//! - CSV ingestion of cash flow schedules

pub mod cashflow;
pub mod solver;

// Re-export commonly used types
pub use cashflow::{CashFlowEntry, CashFlowSeries};
pub use solver::{IrrError, IrrSolver, SolverConfig};

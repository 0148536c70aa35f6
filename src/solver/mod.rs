//! Newton-Raphson IRR solving

mod error;
mod newton;

pub use error::IrrError;
pub use newton::{
    IrrSolver, SolverConfig, DEFAULT_INITIAL_GUESS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};

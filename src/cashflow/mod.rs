//! Cash flow series construction and NPV evaluation

mod loader;
mod series;

pub use loader::{load_series, load_series_from_reader};
pub use series::{CashFlowEntry, CashFlowSeries};

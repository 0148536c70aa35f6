//! Cash flow series and NPV evaluation

use serde::{Deserialize, Serialize};

use crate::solver::{IrrError, IrrSolver};

/// A single signed cash movement at a discrete period
///
/// Period 0 is the valuation date (typically the initial investment, entered
/// as a negative amount); later periods are typically inflows, but the sign
/// is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub period: u32,
    pub amount: f64,
}

impl CashFlowEntry {
    pub fn new(period: u32, amount: f64) -> Self {
        Self { period, amount }
    }
}

/// An ordered series of cash flow entries
///
/// Entries are kept in insertion order. Periods are not required to be
/// unique or sorted; duplicate periods simply contribute additional terms
/// to the NPV sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSeries {
    entries: Vec<CashFlowEntry>,
}

impl CashFlowSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cash flow at the given period
    ///
    /// No validation is performed: duplicate and out-of-order periods are
    /// accepted as entered.
    pub fn add_entry(&mut self, period: u32, amount: f64) {
        self.entries.push(CashFlowEntry::new(period, amount));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CashFlowEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CashFlowEntry> {
        self.entries.iter()
    }

    /// Undiscounted sum of all amounts
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Whether the series has both positive and negative amounts
    ///
    /// A real IRR can only exist when the amounts change sign at least once;
    /// without one the solver runs out its iteration budget. Diagnostic only,
    /// never consulted by the solver itself.
    pub fn has_sign_change(&self) -> bool {
        let has_positive = self.entries.iter().any(|e| e.amount > 0.0);
        let has_negative = self.entries.iter().any(|e| e.amount < 0.0);
        has_positive && has_negative
    }

    /// Net present value of the series at the given periodic rate
    ///
    /// `Σ amount_i / (1 + rate)^period_i` over all entries. An empty series
    /// evaluates to 0 at every rate. `rate = -1` is not guarded; the
    /// division follows IEEE semantics.
    pub fn npv(&self, rate: f64) -> f64 {
        self.entries
            .iter()
            .map(|e| e.amount / (1.0 + rate).powi(e.period as i32))
            .sum()
    }

    /// First derivative of [`npv`](Self::npv) with respect to the rate
    ///
    /// `Σ -period_i * amount_i / (1 + rate)^(period_i + 1)`.
    pub fn npv_derivative(&self, rate: f64) -> f64 {
        self.entries
            .iter()
            .map(|e| -(e.period as f64) * e.amount / (1.0 + rate).powi(e.period as i32 + 1))
            .sum()
    }

    /// Solve for the IRR of this series with default solver settings
    pub fn irr(&self) -> Result<f64, IrrError> {
        IrrSolver::default().solve(self)
    }
}

impl From<Vec<(u32, f64)>> for CashFlowSeries {
    fn from(pairs: Vec<(u32, f64)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(period, amount)| CashFlowEntry::new(period, amount))
            .collect();
        Self { entries }
    }
}

impl FromIterator<CashFlowEntry> for CashFlowSeries {
    fn from_iter<I: IntoIterator<Item = CashFlowEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CashFlowSeries {
    type Item = &'a CashFlowEntry;
    type IntoIter = std::slice::Iter<'a, CashFlowEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

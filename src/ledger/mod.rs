//! The in-memory expense ledger: an ordered, explicitly owned record list.

use serde::{Deserialize, Serialize};

use crate::domain::Expense;

/// Ordered collection of expenses, insertion order preserved.
///
/// The ledger is the single in-memory source of truth. It is created empty or
/// loaded through the storage layer and passed explicitly to whatever needs
/// it; there is no process-wide shared instance. Serializes as the bare
/// record array used by the on-disk format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an expense. Field validation happens before construction, so
    /// a well-formed record always succeeds.
    pub fn add(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Read-only view of all records in insertion order.
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    /// Removes every record. Idempotent.
    pub fn clear(&mut self) {
        self.expenses.clear();
    }

    /// Records whose category matches `name` case-insensitively, in insertion
    /// order. Zero matches is a valid outcome, not an error.
    pub fn filter_by_category(&self, name: &str) -> Vec<&Expense> {
        let needle = name.to_lowercase();
        self.expenses
            .iter()
            .filter(|expense| expense.category.to_lowercase() == needle)
            .collect()
    }

    /// Sum of all amounts; `0.0` for an empty ledger.
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

//! Stateless aggregation over a borrowed ledger.

use std::collections::HashMap;

use crate::ledger::Ledger;

/// Derives totals and groupings from a [`Ledger`]. Holds no state; every call
/// recomputes from the records it is handed.
pub struct SummaryService;

impl SummaryService {
    /// Total per distinct category string, keyed exactly as recorded (no case
    /// folding). An empty ledger yields an empty map.
    pub fn category_totals(ledger: &Ledger) -> HashMap<String, f64> {
        let mut totals = HashMap::new();
        for expense in ledger.all() {
            *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
        }
        totals
    }

    /// Total per `mm/yyyy` monthly key. Dates are validated on entry, so
    /// every record contributes a well-formed key; an empty ledger yields an
    /// empty map. Key ordering is map semantics only; callers sort for
    /// display.
    pub fn monthly_totals(ledger: &Ledger) -> HashMap<String, f64> {
        let mut totals = HashMap::new();
        for expense in ledger.all() {
            *totals.entry(expense.date.month_key()).or_insert(0.0) += expense.amount;
        }
        totals
    }
}

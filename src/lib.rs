#![doc(test(attr(deny(warnings))))]

//! Expense Tracker offers a small expense ledger, aggregation helpers, and the
//! JSON persistence layer behind the `expense_tracker_cli` menu shell.

pub mod cli;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Tracker tracing initialized.");
    });
}

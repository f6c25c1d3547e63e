//! Persistence gateway for the expense ledger and derived summaries.

pub mod json_store;

pub use json_store::{JsonStore, LoadOutcome, RecordIssue};

pub type Result<T> = std::result::Result<T, crate::errors::LedgerError>;

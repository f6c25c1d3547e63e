//! Domain types representing a single recorded expense.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Calendar date of an expense, always in the strict `dd/mm/yyyy` shape.
///
/// Construction goes through [`ExpenseDate::parse`], so a value of this type
/// is guaranteed to carry a valid calendar date and a well-formed monthly
/// grouping key. Malformed input is an explicit [`LedgerError::InvalidDate`]
/// instead of producing garbage keys downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpenseDate(NaiveDate);

impl ExpenseDate {
    /// Parses a `dd/mm/yyyy` string, rejecting anything that is not exactly
    /// two-digit day, two-digit month, four-digit year.
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        let bytes = input.as_bytes();
        if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
            return Err(LedgerError::InvalidDate(format!(
                "expected dd/mm/yyyy, got '{input}'"
            )));
        }
        let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
            .map_err(|err| LedgerError::InvalidDate(format!("'{input}': {err}")))?;
        Ok(Self(date))
    }

    /// Returns the `mm/yyyy` key used to group expenses by month.
    pub fn month_key(&self) -> String {
        self.0.format("%m/%Y").to_string()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl TryFrom<String> for ExpenseDate {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExpenseDate> for String {
    fn from(date: ExpenseDate) -> Self {
        date.to_string()
    }
}

/// A single expense entry. Records carry no identifier and duplicates are
/// permitted; the ledger preserves insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub date: ExpenseDate,
    pub description: String,
    pub category: String,
    pub amount: f64,
}

impl Expense {
    pub fn new(
        date: ExpenseDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            category: category.into(),
            amount,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - ${}",
            self.date, self.description, self.category, self.amount
        )
    }
}

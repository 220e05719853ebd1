//! Expense data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single recorded expense.
///
/// Records are immutable once written and have no natural key; multiple
/// records may share a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Calendar day the expense belongs to (no time component).
    pub date: NaiveDate,

    /// Free-text description.
    pub description: String,

    /// Monetary amount, strictly positive.
    pub amount: Decimal,
}

/// Derived per-day aggregate: the sum of all expense amounts for a date.
///
/// A row exists if and only if at least one expense exists for the date.
/// The detail rows are the source of truth; this is denormalization for
/// charting and reporting consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// Calendar day (unique).
    pub date: NaiveDate,

    /// Sum of all expense amounts recorded for `date`.
    pub total: Decimal,
}

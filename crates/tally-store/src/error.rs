//! Error types for the tally-store library.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the tally-store library.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage unreachable, corrupted, or a transaction aborted. The write
    /// is not applied; the caller may retry.
    #[error("persistence error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Rejected amount: expenses must be strictly positive.
    #[error("invalid expense amount: {0}")]
    InvalidAmount(Decimal),

    /// A stored value could not be read back (unparseable amount or date).
    #[error("corrupt stored value: {0}")]
    Corrupt(String),

    /// The daily aggregate disagrees with the detail rows. Should never
    /// occur while every write goes through `record_expense`.
    #[error("daily total for {date} is {actual}, expected {expected}")]
    InvariantViolation {
        date: NaiveDate,
        expected: Decimal,
        actual: Decimal,
    },
}

/// Result type for the tally-store library.
pub type Result<T> = std::result::Result<T, StoreError>;

//! Transactional expense ledger.
//!
//! This crate owns the `expenses` detail table and the derived
//! `daily_totals` aggregate, kept consistent under a single-writer model:
//! every insert recomputes the day's total inside the same transaction.

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::Ledger;

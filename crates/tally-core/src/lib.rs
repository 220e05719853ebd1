//! Core library for receipt expense tracking.
//!
//! This crate provides:
//! - Total amount extraction from raw receipt OCR text
//! - Expense and daily-total data models
//! - Extraction heuristics configuration
//!
//! The extraction engine is pure and stateless; persistence lives in the
//! companion `tally-store` crate.

pub mod error;
pub mod extract;
pub mod models;

pub use error::{CoreError, Result};
pub use extract::{extract_total, TotalExtractor};
pub use models::config::ExtractionConfig;
pub use models::expense::{DailyTotal, ExpenseRecord};

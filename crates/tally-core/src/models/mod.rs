//! Data models for expense tracking.

pub mod config;
pub mod expense;

pub use config::ExtractionConfig;
pub use expense::{DailyTotal, ExpenseRecord};

//! Configuration for the total extraction heuristics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for the extraction cascade.
///
/// Keyword and currency-marker sets are data, not code: extending them does
/// not require touching the cascade logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Labels that anchor a total amount (matched case-insensitively).
    pub keywords: Vec<String>,

    /// Currency symbols/codes that may precede the amount.
    pub currency_markers: Vec<String>,

    /// Values at or below this threshold are discarded by the final
    /// fallback stage (filters item counts and stray small numbers).
    pub min_fallback_amount: Decimal,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            keywords: [
                "total due",
                "grand total",
                "balance due",
                "amount paid",
                "total",
                "sum",
                "price",
                "charge",
            ]
            .map(String::from)
            .to_vec(),
            currency_markers: ["$", "RM", "MYR", "SGD", "USD", "EUR", "\u{20ac}", "\u{a3}"]
                .map(String::from)
                .to_vec(),
            min_fallback_amount: Decimal::ONE,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

//! Total amount extraction from receipt OCR text.
//!
//! The extraction engine runs an ordered fallback cascade over the raw
//! text; each stage is attempted only if the previous one produced nothing.
//! "Not found" is a normal outcome, returned as `None`, never an error.

pub mod normalize;
pub mod patterns;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use self::normalize::parse_amount;
use self::patterns::{keyword_total_pattern, NUMERIC_TOKEN, TWO_DECIMAL};

/// Receipt total extractor.
///
/// Pure and stateless apart from its compiled patterns; safe to share
/// across callers.
pub struct TotalExtractor {
    config: ExtractionConfig,
    keyword_pattern: Regex,
}

impl TotalExtractor {
    /// Create an extractor with the default keyword and currency sets.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create an extractor with custom heuristics configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        let keyword_pattern = keyword_total_pattern(&config);
        Self {
            config,
            keyword_pattern,
        }
    }

    /// Extract the most likely total from raw OCR text.
    ///
    /// Stages, in order of confidence:
    /// 1. Last keyword-anchored amount ("Total: 11.60")
    /// 2. Largest standalone two-decimal number
    /// 3. Largest number overall, ignoring values at or below the
    ///    configured threshold
    ///
    /// Never panics on malformed input; parse failures degrade to the next
    /// stage or to `None`.
    pub fn extract_total(&self, text: &str) -> Option<Decimal> {
        let stages: [(&str, fn(&Self, &str) -> Option<Decimal>); 3] = [
            ("keyword", Self::stage_keyword_anchored),
            ("two-decimal", Self::stage_largest_two_decimal),
            ("fallback", Self::stage_largest_filtered),
        ];

        for (name, stage) in stages {
            if let Some(amount) = stage(self, text) {
                debug!(stage = name, %amount, "total extracted");
                // Monetary quantization: never more than two fraction digits.
                return Some(amount.round_dp(2));
            }
        }

        debug!("no total found");
        None
    }

    /// Stage 1: amounts anchored by a total-indicating keyword.
    ///
    /// Receipts place the final total after line items, so among all
    /// keyword matches in document order the last one is the most reliable
    /// (it is the grand total, not a subtotal).
    fn stage_keyword_anchored(&self, text: &str) -> Option<Decimal> {
        let last = self
            .keyword_pattern
            .captures_iter(text)
            .last()
            .map(|caps| caps[1].to_string())?;

        parse_amount(&last)
    }

    /// Stage 2: the largest standalone number with exactly two decimal
    /// digits. The total almost always has cents and is typically the
    /// largest such quantity on the receipt.
    fn stage_largest_two_decimal(&self, text: &str) -> Option<Decimal> {
        TWO_DECIMAL
            .find_iter(text)
            .filter_map(|m| parse_amount(m.as_str()))
            .max()
    }

    /// Stage 3: the largest number overall, for totals OCR'd without a
    /// decimal point. Values at or below the threshold are discarded as
    /// likely item counts or quantities.
    fn stage_largest_filtered(&self, text: &str) -> Option<Decimal> {
        NUMERIC_TOKEN
            .find_iter(text)
            .filter_map(|m| parse_amount(m.as_str()))
            .filter(|v| *v > self.config.min_fallback_amount)
            .max()
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the most likely total from raw OCR text using the default
/// configuration.
pub fn extract_total(text: &str) -> Option<Decimal> {
    TotalExtractor::new().extract_total(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_keyword_anchored_total() {
        assert_eq!(extract_total("Total: 11.60"), Some(dec("11.60")));
        assert_eq!(extract_total("GRAND TOTAL $45.99"), Some(dec("45.99")));
        assert_eq!(extract_total("Balance due - RM 8.20"), Some(dec("8.20")));
        assert_eq!(extract_total("Amount Paid: 1,234.56"), Some(dec("1234.56")));
    }

    #[test]
    fn test_last_keyword_match_wins() {
        let text = "Subtotal 10.74\nTax 0.86\nTotal 11.60";
        assert_eq!(extract_total(text), Some(dec("11.60")));
    }

    #[test]
    fn test_full_receipt() {
        let text = "\
            GROCERY STORE\n\
            123 Main Street\n\
            --------------------\n\
            Milk                 2.99\n\
            Bread                3.50\n\
            Eggs                 4.25\n\
            Subtotal            10.74\n\
            Tax                  0.86\n\
            Total               11.60\n\
            Credit Card\n";
        assert_eq!(extract_total(text), Some(dec("11.60")));
    }

    #[test]
    fn test_largest_two_decimal_without_keyword() {
        assert_eq!(
            extract_total("Milk 2.99 Bread 3.50 11.60"),
            Some(dec("11.60"))
        );
    }

    #[test]
    fn test_fallback_largest_filtered() {
        // No keyword, no two-decimal number; 2 and 3 both pass the > 1.0
        // filter, so the largest survivor wins.
        assert_eq!(extract_total("Qty 2 Qty 3"), Some(dec("3")));
    }

    #[test]
    fn test_fallback_threshold_is_exclusive() {
        // Values at or below 1.0 never qualify.
        assert_eq!(extract_total("Qty 1"), None);
        assert_eq!(extract_total("0.5 1.0 0.9"), None);
    }

    #[test]
    fn test_total_without_decimal_point() {
        // "50.00 read as 50" falls through to stage 3.
        assert_eq!(extract_total("Items 2 and 3, paid 50"), Some(dec("50")));
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert_eq!(extract_total(""), None);
        assert_eq!(extract_total("   \n\t  "), None);
        assert_eq!(extract_total("no numbers here"), None);
    }

    #[test]
    fn test_keyword_parse_failure_falls_through() {
        // 30 digits overflow Decimal; the failed conversion must degrade to
        // stage 2 rather than abort.
        let text = "Total: 999,999,999,999,999,999,999,999,999,999\nMilk 2.99";
        assert_eq!(extract_total(text), Some(dec("2.99")));
    }

    #[test]
    fn test_extraction_is_pure() {
        let extractor = TotalExtractor::new();
        let text = "Subtotal 10.74 Total 11.60";
        assert_eq!(extractor.extract_total(text), extractor.extract_total(text));
    }

    #[test]
    fn test_custom_keywords() {
        let config = ExtractionConfig {
            keywords: vec!["montant".to_string()],
            ..ExtractionConfig::default()
        };
        let extractor = TotalExtractor::with_config(config);

        assert_eq!(extractor.extract_total("Montant: 9.99"), Some(dec("9.99")));
        // "Total" is no longer a keyword; stage 2 picks the largest
        // two-decimal number instead.
        assert_eq!(
            extractor.extract_total("Subtotal 12.00 Total 9.99"),
            Some(dec("12.00"))
        );
    }

    #[test]
    fn test_result_quantized_to_two_places() {
        assert_eq!(extract_total("reading 12.347"), Some(dec("12.35")));
    }
}

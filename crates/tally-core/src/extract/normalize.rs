//! Numeric token normalization.
//!
//! OCR output renders amounts with currency symbols, comma-grouped
//! thousands, and stray whitespace; these helpers reduce a matched token to
//! something `Decimal` can parse.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Strip thousands separators (commas, spaces, non-breaking spaces) from a
/// matched numeric literal.
pub fn strip_grouping(token: &str) -> String {
    token
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{00a0}'))
        .collect()
}

/// Parse a matched numeric token into a decimal amount.
///
/// Returns `None` on failure; a conversion failure inside a cascade stage
/// is recovered by falling through to the next stage, never surfaced.
pub fn parse_amount(token: &str) -> Option<Decimal> {
    Decimal::from_str(&strip_grouping(token)).ok()
}

//! Regex patterns for receipt total extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::config::ExtractionConfig;

lazy_static! {
    // A whole numeric token with exactly two decimal digits (e.g. 11.60).
    // Receipts almost always render monetary values this way.
    pub static ref TWO_DECIMAL: Regex = Regex::new(
        r"\b\d+\.\d{2}\b"
    ).unwrap();

    // Any whole numeric token, with an optional fractional part.
    pub static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"\b\d+\.?\d*\b"
    ).unwrap();
}

/// Build the keyword-anchored total pattern from configuration.
///
/// Matches a total-indicating label, an optional `:`/`-` separator, an
/// optional currency marker, and a number of up to three integer digits
/// with optional comma-grouped thousands and optional two decimal digits.
pub fn keyword_total_pattern(config: &ExtractionConfig) -> Regex {
    let keywords = alternation(&config.keywords);
    let markers = alternation(&config.currency_markers);

    let pattern = format!(
        r"(?i)(?:{keywords})\s*[:\-]?\s*(?:{markers})?\s*(\d{{1,3}}(?:,\d{{3}})*(?:\.\d{{2}})?)"
    );

    // Every dynamic atom goes through regex::escape, so this always compiles.
    Regex::new(&pattern).unwrap()
}

/// Escape a word list into a regex alternation, with whitespace in
/// multi-word entries matched flexibly ("grand total" -> "grand\s*total").
fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| {
            w.split_whitespace()
                .map(|part| regex::escape(part))
                .collect::<Vec<_>>()
                .join(r"\s*")
        })
        .collect::<Vec<_>>()
        .join("|")
}

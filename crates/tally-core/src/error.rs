//! Error types for the tally-core library.

use thiserror::Error;

/// Main error type for the tally-core library.
///
/// Extraction itself never fails: a receipt without a recognizable total is
/// a normal outcome, surfaced as `Option::None` rather than an error.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading or writing a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the tally-core library.
pub type Result<T> = std::result::Result<T, CoreError>;

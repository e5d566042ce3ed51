//! Error types for the Valuator

use domval_domain::InputError;
use thiserror::Error;

/// Errors surfaced to callers of `valuate`
///
/// Model failures never appear here; they are logged and replaced by the
/// heuristic fallback.
#[derive(Error, Debug)]
pub enum ValuationError {
    /// Domain or market input violates its contract
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Valuator configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Input contract violations
//!
//! These are the only failures the pipeline reports to callers. Everything
//! else (missing optional data, an unavailable learned model) degrades to a
//! documented default instead.

use std::fmt;

/// Malformed input the pipeline cannot sensibly default around
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Domain name is empty or whitespace
    EmptyName,

    /// Domain name has no `.`-separated TLD
    MissingTld(String),

    /// Domain name contains an empty label (e.g. `foo..com`)
    EmptyLabel(String),

    /// Declared TLD does not match the name's last label
    TldMismatch {
        /// Full domain name
        name: String,
        /// TLD supplied alongside the name
        tld: String,
    },

    /// A price history entry is zero, negative or not finite
    InvalidPrice {
        /// Position in the history
        index: usize,
        /// Offending value
        value: f64,
    },

    /// A traffic statistic is outside its valid range
    InvalidTraffic(String),

    /// A market context field is outside its valid range
    InvalidMarket {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f64,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyName => write!(f, "domain name is empty"),
            InputError::MissingTld(name) => {
                write!(f, "domain name '{}' has no top-level domain", name)
            }
            InputError::EmptyLabel(name) => {
                write!(f, "domain name '{}' contains an empty label", name)
            }
            InputError::TldMismatch { name, tld } => {
                write!(f, "TLD '{}' does not match domain name '{}'", tld, name)
            }
            InputError::InvalidPrice { index, value } => {
                write!(f, "price history entry {} must be positive, got {}", index, value)
            }
            InputError::InvalidTraffic(msg) => write!(f, "invalid traffic data: {}", msg),
            InputError::InvalidMarket { field, value } => {
                write!(f, "market field '{}' is out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for InputError {}

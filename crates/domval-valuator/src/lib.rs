//! Domval Valuator
//!
//! Runs the valuation pipeline end to end.
//!
//! # Overview
//!
//! ```text
//! DomainInput + MarketContext
//!   → FeatureExtractor → FeatureSet
//!   → learned model (or heuristic fallback) → base value
//!   → trend adjustment × sentiment multiplier → value
//!   → confidence, drivers, insights, comparables, report
//! ```
//!
//! The learned model is optional. It is resolved once per [`ModelRegistry`]
//! on first use, under a timeout; when it is missing, fails to load, or
//! fails to score, the heuristic model answers instead and the caller never
//! sees a model error.
//!
//! # Example Usage
//!
//! ```
//! use domval_domain::{DomainInput, MarketContext};
//! use domval_valuator::{Valuator, ValuatorConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let valuator = Valuator::new(ValuatorConfig::default())?;
//!
//! let result = valuator
//!     .valuate(
//!         &DomainInput::parse("crypto.ai"),
//!         &MarketContext::new(0.9, 0.2, 0.1, 8000.0),
//!     )
//!     .await?;
//!
//! println!("{}: ${:.0} ({:.0}% confidence)", result.domain, result.value, result.confidence * 100.0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod global;
mod registry;
mod valuator;

#[cfg(test)]
mod tests;

pub use config::ValuatorConfig;
pub use error::ValuationError;
pub use global::{current, init, install, is_initialized, shutdown, valuate};
pub use registry::ModelRegistry;
pub use valuator::Valuator;

//! Domval Domain Layer
//!
//! This crate contains the valuation model for domain names: the inputs a
//! caller supplies, the feature set derived from them, and every pure stage of
//! the valuation pipeline. It has ZERO external dependencies and performs no
//! I/O; model loading and orchestration live in other crates.
//!
//! ## Key Concepts
//!
//! - **DomainInput**: a domain name with its optional history and traffic
//! - **MarketContext**: a per-call snapshot of market conditions
//! - **FeatureSet**: linguistic, market, historical and technical signals
//! - **ModelBackend**: the capability that turns features into a base value
//! - **ValuationResult**: value, confidence, drivers, insights, comparables
//!
//! ## Pipeline
//!
//! ```text
//! DomainInput + MarketContext → extraction → FeatureSet
//!     FeatureSet → ModelBackend            → base value
//!     FeatureSet → adjustment              → trend, sentiment
//!     base, trend, sentiment → combine     → value
//!     FeatureSet → confidence, insights    → ValuationResult
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adjustment;
pub mod confidence;
pub mod domain;
pub mod error;
pub mod extraction;
pub mod features;
pub mod insights;
pub mod market;
pub mod report;
pub mod tables;
pub mod traits;
pub mod valuation;

// Re-exports for convenience
pub use domain::{DomainInput, TrafficStats};
pub use error::InputError;
pub use features::{
    FeatureSet, FeatureVector, HistoricalFeatures, LinguisticFeatures, MarketFeatures,
    TechnicalFeatures, FEATURE_DIMENSIONS,
};
pub use market::MarketContext;
pub use report::InvestmentReport;
pub use tables::ValuationTables;
pub use traits::ModelBackend;
pub use valuation::{ModelKind, ValuationResult};

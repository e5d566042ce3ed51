//! Trait definitions for pluggable valuation backends
//!
//! These traits define the boundary between the pure pipeline and model
//! implementations. Implementations live in other crates (domval-model).

use crate::FeatureSet;

/// Capability that turns a feature set into a raw base value
///
/// Implemented by the model layer (domval-model). A successful score is a
/// finite, non-negative amount in currency units.
pub trait ModelBackend {
    /// Error type for scoring
    type Error;

    /// Short backend name for logs and reports
    fn name(&self) -> &str;

    /// Score a feature set
    fn score(&self, features: &FeatureSet) -> Result<f64, Self::Error>;
}

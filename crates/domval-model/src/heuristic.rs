//! Heuristic model - the deterministic fallback backend
//!
//! `base × (1 + 3·brandability + 2·keyword_density + 2·tld_popularity
//! + 1.5·age + 1.5·seo_potential + 2·traffic_quality)`
//!
//! Every weight is positive, so raising any weighted signal never lowers the
//! score. The same feature set always yields a bit-identical result.

use domval_domain::{FeatureSet, ModelBackend};
use std::convert::Infallible;

/// Default base value in currency units
pub const DEFAULT_BASE_VALUE: f64 = 1000.0;

/// Weight applied to brandability
pub const BRANDABILITY_WEIGHT: f64 = 3.0;
/// Weight applied to keyword density
pub const KEYWORD_WEIGHT: f64 = 2.0;
/// Weight applied to TLD popularity
pub const TLD_WEIGHT: f64 = 2.0;
/// Weight applied to the age signal
pub const AGE_WEIGHT: f64 = 1.5;
/// Weight applied to SEO potential
pub const SEO_WEIGHT: f64 = 1.5;
/// Weight applied to traffic quality
pub const TRAFFIC_WEIGHT: f64 = 2.0;

/// Weighted-multiplier valuation formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicModel {
    base_value: f64,
}

impl HeuristicModel {
    /// Create a heuristic model with a custom base value
    pub fn new(base_value: f64) -> Self {
        Self { base_value }
    }

    /// Base value the multipliers scale
    pub fn base_value(&self) -> f64 {
        self.base_value
    }

    /// Sum of the weighted multipliers, before adding 1
    pub fn multiplier_sum(features: &FeatureSet) -> f64 {
        features.linguistic.brandability * BRANDABILITY_WEIGHT
            + features.linguistic.keyword_density * KEYWORD_WEIGHT
            + features.market.tld_popularity * TLD_WEIGHT
            + features.historical.age_or_default() * AGE_WEIGHT
            + features.technical.seo_potential * SEO_WEIGHT
            + features.technical.traffic_quality_or_default() * TRAFFIC_WEIGHT
    }

    /// Score without the `Result` wrapper; this path cannot fail
    pub fn value(&self, features: &FeatureSet) -> f64 {
        let value = self.base_value * (1.0 + Self::multiplier_sum(features));
        // f64::max drops NaN, so a poisoned signal scores 0 rather than NaN
        value.max(0.0)
    }
}

impl Default for HeuristicModel {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_VALUE)
    }
}

impl ModelBackend for HeuristicModel {
    type Error = Infallible;

    fn name(&self) -> &str {
        "heuristic"
    }

    fn score(&self, features: &FeatureSet) -> Result<f64, Self::Error> {
        Ok(self.value(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domval_domain::extraction::FeatureExtractor;
    use domval_domain::{DomainInput, MarketContext, ValuationTables};

    fn features_for(name: &str) -> FeatureSet {
        FeatureExtractor::new(ValuationTables::standard()).extract_at(
            &DomainInput::parse(name),
            &MarketContext::new(0.9, 0.2, 0.1, 8000.0),
            1_750_000_000,
        )
    }

    #[test]
    fn test_formula() {
        let mut features = features_for("crypto.ai");
        features.linguistic.brandability = 0.5;
        features.linguistic.keyword_density = 0.5;
        features.market.tld_popularity = 0.5;
        features.historical.age = Some(0.5);
        features.technical.seo_potential = 0.5;
        features.technical.traffic_quality = Some(0.5);

        // 1 + 0.5 * (3 + 2 + 2 + 1.5 + 1.5 + 2) = 7
        assert_eq!(HeuristicModel::default().value(&features), 7000.0);
    }

    #[test]
    fn test_absent_signals_use_defaults() {
        let mut features = features_for("crypto.ai");
        features.historical.age = None;
        features.technical.traffic_quality = None;
        let mut explicit = features.clone();
        explicit.historical.age = Some(0.0);
        explicit.technical.traffic_quality = Some(0.5);

        let model = HeuristicModel::default();
        assert_eq!(model.value(&features), model.value(&explicit));
    }

    #[test]
    fn test_deterministic() {
        let features = features_for("crypto.ai");
        let model = HeuristicModel::default();
        let a = model.score(&features).unwrap();
        let b = model.score(&features).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_keyword_and_tld_bonus() {
        let model = HeuristicModel::default();
        assert!(model.value(&features_for("crypto.ai")) > 1000.0);
        assert!(model.value(&features_for("crypto.ai")) > model.value(&features_for("qzvrtk.biz")));
    }

    #[test]
    fn test_brandability_monotonic() {
        let model = HeuristicModel::default();
        let mut features = features_for("crypto.ai");
        let mut previous = 0.0;
        for step in 0..=10 {
            features.linguistic.brandability = step as f64 / 10.0;
            let value = model.value(&features);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_nan_signal_scores_zero() {
        let mut features = features_for("crypto.ai");
        features.linguistic.brandability = f64::NAN;
        assert_eq!(HeuristicModel::default().value(&features), 0.0);
    }

    #[test]
    fn test_custom_base() {
        let features = features_for("crypto.ai");
        let default = HeuristicModel::default().value(&features);
        let doubled = HeuristicModel::new(2000.0).value(&features);
        assert!((doubled - 2.0 * default).abs() < 1e-9);
    }
}

//! Confidence estimation
//!
//! Confidence reflects how much the valuation can be trusted given the data
//! behind it. It is driven by input completeness and market stability, not by
//! any model's certainty.

use crate::FeatureSet;

/// Sales-history factor when no previous sales are known
pub const NO_SALES_FACTOR: f64 = 0.5;

/// Traffic factor when traffic quality is zero
pub const NO_TRAFFIC_FACTOR: f64 = 0.7;

/// The four factors averaged into the confidence score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceFactors {
    /// Fraction of feature signals present and finite [0.0, 1.0]
    pub data_completeness: f64,

    /// 1 - competitor density
    pub market_stability: f64,

    /// 1 with previous sales, 0.5 without
    pub sales_history: f64,

    /// 1 when traffic quality is positive, 0.7 otherwise
    pub traffic_signal: f64,
}

impl ConfidenceFactors {
    /// Compute the factors for a feature set
    pub fn from_features(features: &FeatureSet) -> Self {
        let sales_history = if features.historical.previous_sales.is_empty() {
            NO_SALES_FACTOR
        } else {
            1.0
        };

        let traffic_signal = if features.technical.traffic_quality_or_default() > 0.0 {
            1.0
        } else {
            NO_TRAFFIC_FACTOR
        };

        Self {
            data_completeness: features.completeness(),
            market_stability: (1.0 - features.market.competitor_density).clamp(0.0, 1.0),
            sales_history,
            traffic_signal,
        }
    }

    /// Mean of the four factors, clamped to [0, 1]
    pub fn score(&self) -> f64 {
        let sum = self.data_completeness
            + self.market_stability
            + self.sales_history
            + self.traffic_signal;
        let score = sum / 4.0;
        if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        }
    }
}

/// Estimate the reliability of a valuation in [0, 1]
pub fn estimate_confidence(features: &FeatureSet) -> f64 {
    ConfidenceFactors::from_features(features).score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::sample_features;

    #[test]
    fn test_full_data_confidence() {
        let features = sample_features();
        // completeness 1, stability 0.6, sales 1, traffic 1
        assert!((estimate_confidence(&features) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_missing_history_lowers_confidence() {
        let mut features = sample_features();
        let full = estimate_confidence(&features);

        features.historical.previous_sales.clear();
        features.historical.age = None;
        features.historical.price_appreciation = None;

        let factors = ConfidenceFactors::from_features(&features);
        assert_eq!(factors.sales_history, NO_SALES_FACTOR);
        assert!((factors.data_completeness - 12.0 / 14.0).abs() < 1e-12);
        assert!(estimate_confidence(&features) < full);
    }

    #[test]
    fn test_zero_traffic_quality() {
        let mut features = sample_features();
        features.technical.traffic_quality = Some(0.0);
        let factors = ConfidenceFactors::from_features(&features);
        assert_eq!(factors.traffic_signal, NO_TRAFFIC_FACTOR);
        // Zero is a present value, not a missing one
        assert_eq!(factors.data_completeness, 1.0);
    }

    #[test]
    fn test_absent_traffic_uses_default() {
        let mut features = sample_features();
        features.technical.traffic_quality = None;
        let factors = ConfidenceFactors::from_features(&features);
        assert_eq!(factors.traffic_signal, 1.0);
    }

    #[test]
    fn test_nan_signal_does_not_poison_score() {
        let mut features = sample_features();
        features.linguistic.brandability = f64::NAN;
        let score = estimate_confidence(&features);
        assert!((0.0..=1.0).contains(&score));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::features::fixtures::sample_features;
    use proptest::prelude::*;

    proptest! {
        /// Property: confidence is always within [0, 1]
        #[test]
        fn test_confidence_range(
            density in 0.0f64..=1.0,
            traffic in proptest::option::of(0.0f64..=1.0),
            age in proptest::option::of(0.0f64..=1.0),
            has_sales in any::<bool>(),
        ) {
            let mut features = sample_features();
            features.market.competitor_density = density;
            features.technical.traffic_quality = traffic;
            features.historical.age = age;
            if !has_sales {
                features.historical.previous_sales.clear();
            }
            let score = estimate_confidence(&features);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        /// Property: more competition never raises confidence
        #[test]
        fn test_competition_lowers_confidence(low in 0.0f64..=0.5, delta in 0.0f64..=0.5) {
            let mut a = sample_features();
            a.market.competitor_density = low;
            let mut b = a.clone();
            b.market.competitor_density = low + delta;
            prop_assert!(estimate_confidence(&b) <= estimate_confidence(&a));
        }
    }
}

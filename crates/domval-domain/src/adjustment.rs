//! Trend, sentiment and aggregation
//!
//! The base value from a [`crate::ModelBackend`] is scaled by two bounded,
//! positive multipliers, so a non-negative base always yields a non-negative
//! final value.

use crate::FeatureSet;

/// Largest trend adjustment (20%)
pub const MAX_TREND_ADJUSTMENT: f64 = 0.2;

/// Search volume at which the demand signal saturates
pub const SEARCH_VOLUME_SATURATION: f64 = 10_000.0;

/// Sentiment multiplier at sentiment 0
pub const MIN_SENTIMENT_MULTIPLIER: f64 = 0.8;

/// Sentiment multiplier span: 0.8 at sentiment 0, 1.2 at sentiment 1
pub const SENTIMENT_MULTIPLIER_SPAN: f64 = 0.4;

/// Market momentum adjustment in [0, 0.2]
///
/// Mean of industry trend, saturated search demand and inverse competition,
/// times 0.2.
pub fn trend_adjustment(features: &FeatureSet) -> f64 {
    let market = &features.market;
    let demand = (market.search_volume / SEARCH_VOLUME_SATURATION).min(1.0);
    let terms = [
        market.industry_trend,
        demand,
        1.0 - market.competitor_density,
    ];
    mean_unit(&terms) * MAX_TREND_ADJUSTMENT
}

/// Qualitative favorability in [0, 1]
///
/// Mean of brandability, keyword density, inverse competition and SEO
/// potential.
pub fn sentiment_score(features: &FeatureSet) -> f64 {
    let terms = [
        features.linguistic.brandability,
        features.linguistic.keyword_density,
        1.0 - features.market.competitor_density,
        features.technical.seo_potential,
    ];
    mean_unit(&terms)
}

/// Map sentiment in [0, 1] to a multiplier in [0.8, 1.2]
pub fn sentiment_multiplier(sentiment: f64) -> f64 {
    MIN_SENTIMENT_MULTIPLIER + sentiment.clamp(0.0, 1.0) * SENTIMENT_MULTIPLIER_SPAN
}

/// Combine base value, trend adjustment and sentiment into the final value
///
/// `base × (1 + trend) × (0.8 + 0.4 × sentiment)`
pub fn combine(base: f64, trend_adjustment: f64, sentiment: f64) -> f64 {
    let adjusted = base * (1.0 + trend_adjustment);
    adjusted * sentiment_multiplier(sentiment)
}

/// Mean of terms, each clamped to [0, 1]; NaN terms count as 0
fn mean_unit(terms: &[f64]) -> f64 {
    let sum: f64 = terms
        .iter()
        .map(|&t| if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) })
        .sum();
    sum / terms.len() as f64
}

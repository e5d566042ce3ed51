//! Feature set - the signals every pipeline stage reads
//!
//! Signals derived from optional inputs are `Option<f64>`. `None` means the
//! input was absent; consumers resolve it through the `*_or_default`
//! accessors, while confidence scoring counts it as missing.

/// Default age signal when the registration date is unknown
pub const DEFAULT_AGE: f64 = 0.0;

/// Default appreciation when fewer than two prices are known
pub const DEFAULT_PRICE_APPRECIATION: f64 = 0.0;

/// Default traffic quality when no traffic data exists
pub const DEFAULT_TRAFFIC_QUALITY: f64 = 0.5;

/// Number of scalar signals in a [`FeatureVector`]
pub const FEATURE_DIMENSIONS: usize = 14;

/// Signals derived from the name's spelling and sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinguisticFeatures {
    /// Character count of the second-level label
    pub length: f64,
    /// Estimated syllable count (>= 1)
    pub syllables: f64,
    /// Premium keyword density [0.0, 1.0]
    pub keyword_density: f64,
    /// Composite memorability/marketability [0.0, 1.0]
    pub brandability: f64,
    /// Closeness of the vowel ratio to natural speech [0.0, 1.0]
    pub phonetic_score: f64,
}

/// Signals derived from the TLD and market context
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketFeatures {
    /// TLD popularity [0.0, 1.0]
    pub tld_popularity: f64,
    /// Industry momentum [0.0, 1.0]
    pub industry_trend: f64,
    /// Raw monthly search volume
    pub search_volume: f64,
    /// Competitor density [0.0, 1.0]
    pub competitor_density: f64,
}

/// Signals derived from registration and sales history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalFeatures {
    /// Age in years / 5, capped at 1
    pub age: Option<f64>,
    /// (last - first) / first over the price history
    pub price_appreciation: Option<f64>,
    /// Previous sale prices, verbatim
    pub previous_sales: Vec<f64>,
}

/// Signals describing the name as a web property
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechnicalFeatures {
    /// 1 - bounce rate
    pub traffic_quality: Option<f64>,
    /// Search-engine suitability [0.0, 1.0]
    pub seo_potential: f64,
    /// Ease of typing on a phone [0.0, 1.0]
    pub mobile_score: f64,
}

/// Everything the pipeline knows about one domain, created fresh per call
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    /// Spelling and sound
    pub linguistic: LinguisticFeatures,
    /// TLD and market
    pub market: MarketFeatures,
    /// Registration and sales history
    pub historical: HistoricalFeatures,
    /// Web-property signals
    pub technical: TechnicalFeatures,
}

impl HistoricalFeatures {
    /// Age signal, [`DEFAULT_AGE`] when absent
    pub fn age_or_default(&self) -> f64 {
        self.age.unwrap_or(DEFAULT_AGE)
    }

    /// Appreciation, [`DEFAULT_PRICE_APPRECIATION`] when absent
    pub fn price_appreciation_or_default(&self) -> f64 {
        self.price_appreciation.unwrap_or(DEFAULT_PRICE_APPRECIATION)
    }
}

impl TechnicalFeatures {
    /// Traffic quality, [`DEFAULT_TRAFFIC_QUALITY`] when absent
    pub fn traffic_quality_or_default(&self) -> f64 {
        self.traffic_quality.unwrap_or(DEFAULT_TRAFFIC_QUALITY)
    }
}

impl FeatureSet {
    /// Every scalar signal in vector order, `None` where absent
    pub fn signals(&self) -> [Option<f64>; FEATURE_DIMENSIONS] {
        let l = &self.linguistic;
        let m = &self.market;
        let h = &self.historical;
        let t = &self.technical;
        [
            Some(l.length),
            Some(l.syllables),
            Some(l.keyword_density),
            Some(l.brandability),
            Some(l.phonetic_score),
            Some(m.tld_popularity),
            Some(m.industry_trend),
            Some(m.search_volume),
            Some(m.competitor_density),
            h.age,
            h.price_appreciation,
            t.traffic_quality,
            Some(t.seo_potential),
            Some(t.mobile_score),
        ]
    }

    /// Fraction of signals that are present and finite
    ///
    /// Zero counts as present; absent and NaN/infinite values do not.
    pub fn completeness(&self) -> f64 {
        let signals = self.signals();
        let present = signals
            .iter()
            .filter(|s| s.is_some_and(f64::is_finite))
            .count();
        present as f64 / signals.len() as f64
    }

    /// Model input with absent signals resolved to their defaults
    pub fn to_vector(&self) -> FeatureVector {
        let l = &self.linguistic;
        let m = &self.market;
        let h = &self.historical;
        let t = &self.technical;
        FeatureVector([
            l.length,
            l.syllables,
            l.keyword_density,
            l.brandability,
            l.phonetic_score,
            m.tld_popularity,
            m.industry_trend,
            m.search_volume,
            m.competitor_density,
            h.age_or_default(),
            h.price_appreciation_or_default(),
            t.traffic_quality_or_default(),
            t.seo_potential,
            t.mobile_score,
        ])
    }
}

/// Fixed-order numeric model input
///
/// Order: length, syllables, keyword_density, brandability, phonetic_score,
/// tld_popularity, industry_trend, search_volume, competitor_density, age,
/// price_appreciation, traffic_quality, seo_potential, mobile_score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_DIMENSIONS]);

impl FeatureVector {
    /// Signal names in vector order
    pub const NAMES: [&'static str; FEATURE_DIMENSIONS] = [
        "length",
        "syllables",
        "keyword_density",
        "brandability",
        "phonetic_score",
        "tld_popularity",
        "industry_trend",
        "search_volume",
        "competitor_density",
        "age",
        "price_appreciation",
        "traffic_quality",
        "seo_potential",
        "mobile_score",
    ];

    /// Values as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `(name, value)` pairs in vector order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Self::NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A fully populated feature set with mid-range signals
    pub fn sample_features() -> FeatureSet {
        FeatureSet {
            linguistic: LinguisticFeatures {
                length: 6.0,
                syllables: 2.0,
                keyword_density: 0.2,
                brandability: 0.8,
                phonetic_score: 0.9,
            },
            market: MarketFeatures {
                tld_popularity: 1.0,
                industry_trend: 0.6,
                search_volume: 4000.0,
                competitor_density: 0.4,
            },
            historical: HistoricalFeatures {
                age: Some(0.4),
                price_appreciation: Some(0.5),
                previous_sales: vec![1200.0],
            },
            technical: TechnicalFeatures {
                traffic_quality: Some(0.6),
                seo_potential: 0.55,
                mobile_score: 1.0,
            },
        }
    }
}

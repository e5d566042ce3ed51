//! Feature extraction
//!
//! Converts a [`DomainInput`] and [`MarketContext`] into a [`FeatureSet`].
//! Every function here is pure and deterministic; the only ambient input is
//! the reference time used for age, which [`FeatureExtractor::extract_at`]
//! takes explicitly.

use crate::features::{
    FeatureSet, HistoricalFeatures, LinguisticFeatures, MarketFeatures, TechnicalFeatures,
};
use crate::tables::ValuationTables;
use crate::{DomainInput, MarketContext};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Vowels for syllable, cluster and phonetic analysis
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Label length that reads as most brandable
const OPTIMAL_BRAND_LENGTH: f64 = 6.0;

/// Label length that performs best for search
const OPTIMAL_SEO_LENGTH: f64 = 10.0;

/// Vowel ratio of natural English speech
const TARGET_VOWEL_RATIO: f64 = 0.4;

/// Contribution of each matched premium keyword
const KEYWORD_WEIGHT: f64 = 0.2;

/// Years over which age saturates
const AGE_SATURATION_YEARS: f64 = 5.0;

const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// Builds feature sets against a set of lookup tables
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor<'a> {
    tables: &'a ValuationTables,
}

impl<'a> FeatureExtractor<'a> {
    /// Create an extractor over the given tables
    pub fn new(tables: &'a ValuationTables) -> Self {
        Self { tables }
    }

    /// Extract features, measuring age against the system clock
    pub fn extract(&self, domain: &DomainInput, market: &MarketContext) -> FeatureSet {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.extract_at(domain, market, now)
    }

    /// Extract features, measuring age against `now_secs` (unix seconds)
    pub fn extract_at(
        &self,
        domain: &DomainInput,
        market: &MarketContext,
        now_secs: u64,
    ) -> FeatureSet {
        let sld = domain.sld();
        let linguistic = self.linguistic(sld);
        let market = self.market(domain.tld(), market);
        let historical = historical(domain, now_secs);
        let technical = technical(domain, sld, &linguistic);

        FeatureSet {
            linguistic,
            market,
            historical,
            technical,
        }
    }

    fn linguistic(&self, sld: &str) -> LinguisticFeatures {
        LinguisticFeatures {
            length: char_len(sld) as f64,
            syllables: count_syllables(sld) as f64,
            keyword_density: self.keyword_density(sld),
            brandability: brandability(sld),
            phonetic_score: phonetic_score(sld),
        }
    }

    fn market(&self, tld: &str, market: &MarketContext) -> MarketFeatures {
        MarketFeatures {
            tld_popularity: self.tables.tld_popularity(tld),
            industry_trend: market.industry_trend,
            search_volume: market.search_volume,
            competitor_density: market.competitor_density,
        }
    }

    /// Matched premium keywords × 0.2, capped at 1
    pub fn keyword_density(&self, sld: &str) -> f64 {
        let matches = self.tables.matching_keywords(sld).count();
        (matches as f64 * KEYWORD_WEIGHT).min(1.0)
    }
}

fn historical(domain: &DomainInput, now_secs: u64) -> HistoricalFeatures {
    let age = domain.registered_at().map(|registered| {
        let years = now_secs.saturating_sub(registered) as f64 / SECONDS_PER_YEAR;
        (years / AGE_SATURATION_YEARS).min(1.0)
    });

    HistoricalFeatures {
        age,
        price_appreciation: price_appreciation(domain.price_history()),
        previous_sales: domain.previous_sales().to_vec(),
    }
}

fn technical(domain: &DomainInput, sld: &str, linguistic: &LinguisticFeatures) -> TechnicalFeatures {
    let traffic_quality = domain.traffic().map(|t| 1.0 - t.bounce_rate);

    let seo_potential = mean(&[
        linguistic.keyword_density,
        length_optimality(char_len(sld), OPTIMAL_SEO_LENGTH),
        readability(sld),
        linguistic.brandability,
    ]);

    TechnicalFeatures {
        traffic_quality,
        seo_potential,
        mobile_score: mobile_score(sld),
    }
}

/// Relative change from the first to the last price
///
/// `None` when fewer than two prices are known.
pub fn price_appreciation(prices: &[f64]) -> Option<f64> {
    match prices {
        [first, .., last] if *first > 0.0 => Some((last - first) / first),
        _ => None,
    }
}

/// Count vowel runs: every transition into a vowel starts a syllable
///
/// Never returns less than 1.
///
/// # Examples
///
/// ```
/// use domval_domain::extraction::count_syllables;
///
/// assert_eq!(count_syllables("a"), 1);
/// assert_eq!(count_syllables("crypto"), 2);
/// assert_eq!(count_syllables("xkcd"), 1);
/// ```
pub fn count_syllables(word: &str) -> usize {
    let mut count = 0;
    let mut prev_vowel = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    count.max(1)
}

/// Mean of length optimality, pronounceability, memorability and uniqueness
pub fn brandability(sld: &str) -> f64 {
    let length_score = length_optimality(char_len(sld), OPTIMAL_BRAND_LENGTH);
    mean(&[
        length_score,
        pronounceability(sld),
        0.5 * length_score + 0.5 * unique_ratio(sld),
        uniqueness(sld),
    ])
}

/// `max(0, 1 - |vowel_ratio - 0.4|)`
pub fn phonetic_score(sld: &str) -> f64 {
    let len = char_len(sld);
    if len == 0 {
        return 0.0;
    }
    let vowels = sld.chars().filter(|&c| is_vowel(c)).count();
    let ratio = vowels as f64 / len as f64;
    (1.0 - (ratio - TARGET_VOWEL_RATIO).abs()).max(0.0)
}

/// 1 at `target` characters, falling linearly to 0 at 0 and 2×target
pub fn length_optimality(len: usize, target: f64) -> f64 {
    (1.0 - (len as f64 - target).abs() / target).max(0.0)
}

/// Flesch reading ease over the label's words, scaled to [0, 1]
pub fn readability(sld: &str) -> f64 {
    let words: Vec<&str> = sld
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return 0.0;
    }

    let word_count = words.len() as f64;
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    // Domain labels are treated as a single sentence.
    let ease = 206.835 - 1.015 * word_count - 84.6 * (syllables as f64 / word_count);
    (ease / 100.0).clamp(0.0, 1.0)
}

/// Ease of typing on a phone
///
/// Starts at 1 and loses 0.3 above 15 characters, 0.2 for digits and 0.1 for
/// hyphens, floored at 0.
pub fn mobile_score(sld: &str) -> f64 {
    let mut score = 1.0;
    if char_len(sld) > 15 {
        score -= 0.3;
    }
    if sld.chars().any(|c| c.is_ascii_digit()) {
        score -= 0.2;
    }
    if sld.contains('-') {
        score -= 0.1;
    }
    f64::max(score, 0.0)
}

/// 1 - share of consonants that directly follow another consonant
fn pronounceability(sld: &str) -> f64 {
    let len = char_len(sld);
    if len == 0 {
        return 0.0;
    }
    let mut clustered = 0;
    let mut prev_consonant = false;
    for c in sld.chars() {
        let consonant = is_consonant(c);
        if consonant && prev_consonant {
            clustered += 1;
        }
        prev_consonant = consonant;
    }
    1.0 - clustered as f64 / len as f64
}

/// 1 - share of characters that repeat an earlier one
fn uniqueness(sld: &str) -> f64 {
    let len = char_len(sld);
    if len == 0 {
        return 0.0;
    }
    let repeated = len - distinct_chars(sld);
    1.0 - repeated as f64 / len as f64
}

fn unique_ratio(sld: &str) -> f64 {
    let len = char_len(sld);
    if len == 0 {
        return 0.0;
    }
    distinct_chars(sld) as f64 / len as f64
}

fn distinct_chars(s: &str) -> usize {
    s.chars().collect::<HashSet<_>>().len()
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c.to_ascii_lowercase())
}

fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !is_vowel(c)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

//! Human-readable value drivers, market insights and comparable names
//!
//! Each driver or insight is emitted when its feature crosses a fixed
//! threshold. When none fires, a single fallback entry is returned so the
//! lists are never empty.

use crate::tables::ValuationTables;
use crate::FeatureSet;

/// Driver emitted when no threshold is met
pub const DEFAULT_DRIVER: &str = "Standard domain characteristics";

/// Insight emitted when no threshold is met
pub const DEFAULT_INSIGHT: &str = "Standard market conditions";

/// Maximum number of comparable names
pub const MAX_COMPARABLES: usize = 3;

type Rule = (fn(&FeatureSet) -> bool, &'static str);

const DRIVER_RULES: &[Rule] = &[
    (|f| f.linguistic.brandability > 0.7, "High brandability potential"),
    (|f| f.linguistic.keyword_density > 0.3, "Premium keyword relevance"),
    (|f| f.market.tld_popularity > 0.8, "Premium TLD extension"),
    (|f| f.historical.age_or_default() > 0.6, "Established domain age"),
    (
        |f| f.historical.price_appreciation_or_default() > 0.2,
        "Strong price appreciation history",
    ),
    (
        |f| f.technical.traffic_quality_or_default() > 0.7,
        "High-quality organic traffic",
    ),
    (|f| f.technical.seo_potential > 0.7, "Strong SEO potential"),
];

const INSIGHT_RULES: &[Rule] = &[
    (|f| f.market.industry_trend > 0.7, "Strong upward industry trend"),
    (
        |f| f.market.search_volume > 5000.0,
        "High search demand for related keywords",
    ),
    (|f| f.market.competitor_density < 0.3, "Low competition in this niche"),
    (
        |f| f.market.competitor_density > 0.7,
        "Crowded market with many competing names",
    ),
];

/// Value drivers in rule order, never empty
pub fn value_drivers(features: &FeatureSet) -> Vec<String> {
    apply_rules(DRIVER_RULES, features, DEFAULT_DRIVER)
}

/// Market insights in rule order, never empty
pub fn market_insights(features: &FeatureSet) -> Vec<String> {
    apply_rules(INSIGHT_RULES, features, DEFAULT_INSIGHT)
}

/// Up to three names sharing the label under alternate TLDs
///
/// # Examples
///
/// ```
/// use domval_domain::insights::comparable_domains;
/// use domval_domain::ValuationTables;
///
/// let names = comparable_domains("crypto.ai", ValuationTables::standard());
/// assert_eq!(names, vec!["crypto.com", "crypto.org", "crypto.net"]);
/// ```
pub fn comparable_domains(name: &str, tables: &ValuationTables) -> Vec<String> {
    let name = name.trim().to_lowercase();
    let Some((label, _)) = name.rsplit_once('.') else {
        return Vec::new();
    };
    if label.is_empty() {
        return Vec::new();
    }

    tables
        .comparable_tlds
        .iter()
        .map(|tld| format!("{}.{}", label, tld))
        .filter(|candidate| *candidate != name)
        .take(MAX_COMPARABLES)
        .collect()
}

fn apply_rules(rules: &[Rule], features: &FeatureSet, fallback: &str) -> Vec<String> {
    let mut out: Vec<String> = rules
        .iter()
        .filter(|(fires, _)| fires(features))
        .map(|(_, text)| text.to_string())
        .collect();
    if out.is_empty() {
        out.push(fallback.to_string());
    }
    out
}

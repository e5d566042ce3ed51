//! Static lookup tables used during feature extraction
//!
//! The standard tables are built once on first use and shared. Callers that
//! need different data (tests, regional markets) construct their own
//! [`ValuationTables`] and hand it to the extractor.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Popularity assumed for any TLD missing from the table
pub const DEFAULT_TLD_POPULARITY: f64 = 0.5;

/// Popularity of well-known TLDs in the aftermarket [0.0, 1.0]
const TLD_POPULARITY: &[(&str, f64)] = &[
    ("com", 1.0),
    ("ai", 0.9),
    ("io", 0.85),
    ("crypto", 0.8),
    ("co", 0.7),
    ("org", 0.7),
    ("app", 0.7),
    ("net", 0.65),
    ("dev", 0.65),
    ("defi", 0.6),
    ("nft", 0.6),
    ("web3", 0.6),
    ("tech", 0.55),
    ("dao", 0.55),
    ("xyz", 0.4),
    ("info", 0.35),
    ("biz", 0.3),
];

/// Keywords that command a premium when they appear in a name
const PREMIUM_KEYWORDS: &[&str] = &[
    "crypto", "bitcoin", "ethereum", "blockchain", "nft", "defi", "web3", "metaverse", "ai",
    "ml", "tech", "app", "cloud", "data", "finance", "bank", "pay", "money", "invest", "trade",
    "market", "shop", "store", "game", "play", "social", "media", "news", "health", "medical",
];

/// Alternate TLDs offered as comparable names, in preference order
const COMPARABLE_TLDS: &[&str] = &["com", "org", "net", "io"];

static STANDARD: LazyLock<ValuationTables> = LazyLock::new(ValuationTables::default);

/// Lookup data owned by the valuation pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationTables {
    /// TLD → popularity [0.0, 1.0]
    pub tld_popularity: HashMap<String, f64>,

    /// Lower-cased premium keywords matched as substrings
    pub premium_keywords: Vec<String>,

    /// Candidate TLDs for comparable domain names
    pub comparable_tlds: Vec<String>,
}

impl ValuationTables {
    /// The shared standard tables
    pub fn standard() -> &'static ValuationTables {
        &STANDARD
    }

    /// Popularity of a TLD, [`DEFAULT_TLD_POPULARITY`] when unknown
    pub fn tld_popularity(&self, tld: &str) -> f64 {
        self.tld_popularity
            .get(&tld.to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_TLD_POPULARITY)
    }

    /// Premium keywords occurring anywhere in `label`
    pub fn matching_keywords<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.premium_keywords
            .iter()
            .map(String::as_str)
            .filter(move |keyword| label.contains(keyword))
    }
}

impl Default for ValuationTables {
    fn default() -> Self {
        Self {
            tld_popularity: TLD_POPULARITY
                .iter()
                .map(|&(tld, score)| (tld.to_string(), score))
                .collect(),
            premium_keywords: PREMIUM_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            comparable_tlds: COMPARABLE_TLDS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tld() {
        let tables = ValuationTables::standard();
        assert_eq!(tables.tld_popularity("com"), 1.0);
        assert_eq!(tables.tld_popularity("AI"), 0.9);
    }

    #[test]
    fn test_unknown_tld_defaults() {
        let tables = ValuationTables::standard();
        assert_eq!(tables.tld_popularity("xyz123"), 0.5);
    }

    #[test]
    fn test_matching_keywords() {
        let tables = ValuationTables::standard();
        let matches: Vec<_> = tables.matching_keywords("cryptopay").collect();
        assert_eq!(matches, vec!["crypto", "pay"]);
    }

    #[test]
    fn test_custom_tables() {
        let mut tables = ValuationTables::default();
        tables.tld_popularity.insert("xyz123".to_string(), 0.1);
        tables.premium_keywords = vec!["widget".to_string()];

        assert_eq!(tables.tld_popularity("xyz123"), 0.1);
        assert_eq!(tables.matching_keywords("widgetco").count(), 1);
        assert_eq!(tables.matching_keywords("cryptopay").count(), 0);
    }
}

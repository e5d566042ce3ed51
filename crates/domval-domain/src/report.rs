//! Investment report derived from a finished valuation

use crate::MarketContext;

/// Volatility above which the risk level is raised one step
pub const HIGH_VOLATILITY: f64 = 0.7;

/// Industry segment inferred from the name's keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketSegment {
    /// Crypto, tokens and decentralized finance
    Crypto,
    /// Software, AI and apps
    Technology,
    /// Banking, payments and investing
    Finance,
    /// Health and medical care
    Healthcare,
    /// Games and entertainment
    Gaming,
    /// Anything else
    General,
}

const SEGMENT_KEYWORDS: &[(MarketSegment, &[&str])] = &[
    (MarketSegment::Crypto, &["crypto", "bitcoin", "ethereum", "defi", "nft"]),
    (MarketSegment::Technology, &["ai", "ml", "tech", "app", "software"]),
    (MarketSegment::Finance, &["finance", "bank", "pay", "invest"]),
    (MarketSegment::Healthcare, &["health", "medical", "care"]),
    (MarketSegment::Gaming, &["game", "play", "entertainment"]),
];

impl MarketSegment {
    /// Classify by the first segment whose keyword occurs in the leading label
    pub fn classify(sld: &str) -> Self {
        let label = sld.split('.').next().unwrap_or_default().to_lowercase();
        SEGMENT_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| label.contains(k)))
            .map(|(segment, _)| *segment)
            .unwrap_or(MarketSegment::General)
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSegment::Crypto => "Cryptocurrency & Blockchain",
            MarketSegment::Technology => "Technology & Software",
            MarketSegment::Finance => "Financial Services",
            MarketSegment::Healthcare => "Healthcare & Medical",
            MarketSegment::Gaming => "Gaming & Entertainment",
            MarketSegment::General => "General Business",
        }
    }
}

/// Investment risk, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    /// Under 500
    Low,
    /// 500 to 5 000
    LowMedium,
    /// 5 000 to 50 000
    Medium,
    /// 50 000 and above
    High,
}

impl RiskLevel {
    /// Risk implied by the value alone
    pub fn for_value(value: f64) -> Self {
        if value >= 50_000.0 {
            RiskLevel::High
        } else if value >= 5_000.0 {
            RiskLevel::Medium
        } else if value >= 500.0 {
            RiskLevel::LowMedium
        } else {
            RiskLevel::Low
        }
    }

    /// One step riskier, saturating at `High`
    pub fn raised(self) -> Self {
        match self {
            RiskLevel::Low => RiskLevel::LowMedium,
            RiskLevel::LowMedium => RiskLevel::Medium,
            RiskLevel::Medium | RiskLevel::High => RiskLevel::High,
        }
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::LowMedium => "Low-Medium Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk, High Reward",
        }
    }
}

/// Buy/hold/pass recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    /// Excellent fundamentals and a high value
    StrongBuy,
    /// Solid fundamentals
    Buy,
    /// Moderate potential; depends on timing
    Hold,
    /// Limited potential
    Pass,
}

impl Recommendation {
    /// Recommend from sentiment (overall quality) and value
    pub fn from_scores(sentiment: f64, value: f64) -> Self {
        if sentiment >= 0.8 && value >= 5_000.0 {
            Recommendation::StrongBuy
        } else if sentiment >= 0.7 && value >= 1_000.0 {
            Recommendation::Buy
        } else if sentiment >= 0.6 {
            Recommendation::Hold
        } else {
            Recommendation::Pass
        }
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold/Consider",
            Recommendation::Pass => "Pass",
        }
    }
}

/// Investment view on a valued domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentReport {
    /// Industry segment
    pub segment: MarketSegment,
    /// How easily the name could be resold [0.0, 1.0]
    pub liquidity_score: f64,
    /// Investment risk
    pub risk_level: RiskLevel,
    /// Recommendation
    pub recommendation: Recommendation,
    /// Lower end of a reasonable asking price (80% of value)
    pub target_low: f64,
    /// Upper end of a reasonable asking price (120% of value)
    pub target_high: f64,
}

impl InvestmentReport {
    /// Build the report for a valued name
    pub fn build(sld: &str, value: f64, sentiment: f64, market: &MarketContext) -> Self {
        let mut risk_level = RiskLevel::for_value(value);
        if market.market_volatility > HIGH_VOLATILITY {
            risk_level = risk_level.raised();
        }

        Self {
            segment: MarketSegment::classify(sld),
            liquidity_score: liquidity_score(value),
            risk_level,
            recommendation: Recommendation::from_scores(sentiment, value),
            target_low: value * 0.8,
            target_high: value * 1.2,
        }
    }
}

fn liquidity_score(value: f64) -> f64 {
    if value >= 10_000.0 {
        0.9
    } else if value >= 1_000.0 {
        0.7
    } else if value >= 100.0 {
        0.5
    } else {
        0.3
    }
}

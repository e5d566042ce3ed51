//! Valuation result - the only durable output of the pipeline

use crate::report::InvestmentReport;
use std::fmt;

/// Which backend produced the base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Externally loaded regression model
    Learned,
    /// Deterministic weighted-multiplier formula
    Heuristic,
}

impl ModelKind {
    /// Backend name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Learned => "learned",
            ModelKind::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated value of a domain with its explanation
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationResult {
    /// Domain that was valued
    pub domain: String,

    /// Estimated value in currency units (>= 0)
    pub value: f64,

    /// Reliability of the estimate [0.0, 1.0]
    pub confidence: f64,

    /// Why the name is worth what it is (never empty)
    pub value_drivers: Vec<String>,

    /// The same label under alternate TLDs (0-3 entries)
    pub comparable_domains: Vec<String>,

    /// Observations about market conditions (never empty)
    pub market_insights: Vec<String>,

    /// Backend that produced the base value
    pub model: ModelKind,

    /// Investment view derived from the value
    pub report: InvestmentReport,
}

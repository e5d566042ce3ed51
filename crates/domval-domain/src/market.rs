//! Market context - conditions supplied fresh with every valuation

use crate::error::InputError;

/// Snapshot of market conditions for a single valuation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketContext {
    /// Momentum of the domain's industry [0.0, 1.0]
    pub industry_trend: f64,

    /// Price volatility of the aftermarket [0.0, 1.0]
    pub market_volatility: f64,

    /// How crowded the niche is with competing names [0.0, 1.0]
    pub competitor_density: f64,

    /// Monthly searches for related keywords (>= 0)
    pub search_volume: f64,
}

impl MarketContext {
    /// Create a market context
    pub fn new(
        industry_trend: f64,
        market_volatility: f64,
        competitor_density: f64,
        search_volume: f64,
    ) -> Self {
        Self {
            industry_trend,
            market_volatility,
            competitor_density,
            search_volume,
        }
    }

    /// Check every field is finite and within its range
    pub fn validate(&self) -> Result<(), InputError> {
        let unit_fields = [
            ("industry_trend", self.industry_trend),
            ("market_volatility", self.market_volatility),
            ("competitor_density", self.competitor_density),
        ];

        for (field, value) in unit_fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(InputError::InvalidMarket { field, value });
            }
        }

        if !self.search_volume.is_finite() || self.search_volume < 0.0 {
            return Err(InputError::InvalidMarket {
                field: "search_volume",
                value: self.search_volume,
            });
        }

        Ok(())
    }
}

impl Default for MarketContext {
    /// Neutral market: every unit signal at its midpoint, no search data
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MarketContext::default().validate().is_ok());
    }

    #[test]
    fn test_trend_out_of_range() {
        let market = MarketContext::new(1.2, 0.2, 0.1, 8000.0);
        assert_eq!(
            market.validate(),
            Err(InputError::InvalidMarket { field: "industry_trend", value: 1.2 })
        );
    }

    #[test]
    fn test_nan_rejected() {
        let market = MarketContext::new(0.5, f64::NAN, 0.1, 8000.0);
        assert!(matches!(
            market.validate(),
            Err(InputError::InvalidMarket { field: "market_volatility", .. })
        ));
    }

    #[test]
    fn test_negative_search_volume_rejected() {
        let market = MarketContext::new(0.5, 0.5, 0.5, -1.0);
        assert!(market.validate().is_err());
    }
}

//! Pipeline tests for the Valuator

#[cfg(test)]
mod tests {
    use crate::{ModelRegistry, ValuationError, Valuator, ValuatorConfig};
    use domval_domain::adjustment::{combine, sentiment_score, trend_adjustment};
    use domval_domain::{DomainInput, InputError, MarketContext, ModelKind, TrafficStats};
    use domval_domain::FeatureVector;
    use domval_model::{LearnedModel, MockRegressor, ModelError, Regressor};
    use std::time::Duration;

    struct CrashingRegressor;

    impl Regressor for CrashingRegressor {
        fn predict(&self, _input: &FeatureVector) -> Result<Vec<f64>, ModelError> {
            panic!("inference runtime aborted")
        }
    }

    fn hot_market() -> MarketContext {
        MarketContext::new(0.9, 0.2, 0.1, 8000.0)
    }

    #[tokio::test]
    async fn test_crypto_ai_heuristic() {
        let valuator = Valuator::heuristic_only();
        let result = valuator
            .valuate(&DomainInput::parse("crypto.ai"), &hot_market())
            .await
            .unwrap();

        assert_eq!(result.domain, "crypto.ai");
        assert_eq!(result.model, ModelKind::Heuristic);
        assert!(result.value > 1000.0);
        // completeness 11/14, stability 0.9, no sales 0.5, default traffic 1.0
        let expected = (11.0 / 14.0 + 0.9 + 0.5 + 1.0) / 4.0;
        assert!((result.confidence - expected).abs() < 1e-9);
        assert!(result
            .value_drivers
            .contains(&"High brandability potential".to_string()));
        assert!(result
            .value_drivers
            .contains(&"Premium TLD extension".to_string()));
        assert_eq!(
            result.comparable_domains,
            vec!["crypto.com", "crypto.org", "crypto.net"]
        );
    }

    #[tokio::test]
    async fn test_learned_model_is_preferred() {
        let valuator = Valuator::heuristic_only()
            .with_learned_model(LearnedModel::new(MockRegressor::new(vec![0.5]), 10_000.0));
        let domain = DomainInput::parse("crypto.ai");
        let market = hot_market();

        let result = valuator.valuate(&domain, &market).await.unwrap();
        assert_eq!(result.model, ModelKind::Learned);

        let features = valuator.features(&domain, &market).unwrap();
        let expected = combine(5000.0, trend_adjustment(&features), sentiment_score(&features));
        assert!((result.value - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_failing_learned_model_falls_back() {
        let regressor = MockRegressor::failing("runtime crashed");
        let valuator = Valuator::heuristic_only()
            .with_learned_model(LearnedModel::new(regressor.clone(), 10_000.0));
        let domain = DomainInput::parse("crypto.ai");

        let fallback = valuator.valuate(&domain, &hot_market()).await.unwrap();
        let heuristic = Valuator::heuristic_only()
            .valuate(&domain, &hot_market())
            .await
            .unwrap();

        assert_eq!(fallback, heuristic);
        assert_eq!(regressor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_panicking_learned_model_falls_back() {
        let valuator = Valuator::heuristic_only()
            .with_learned_model(LearnedModel::new(CrashingRegressor, 10_000.0));
        let domain = DomainInput::parse("crypto.ai");

        let first = valuator.valuate(&domain, &hot_market()).await.unwrap();
        let second = valuator.valuate(&domain, &hot_market()).await.unwrap();
        let heuristic = Valuator::heuristic_only()
            .valuate(&domain, &hot_market())
            .await
            .unwrap();

        assert_eq!(first.model, ModelKind::Heuristic);
        assert_eq!(first, heuristic);
        assert_eq!(second, heuristic);
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back() {
        let valuator = Valuator::heuristic_only()
            .with_learned_model(LearnedModel::new(MockRegressor::new(vec![0.1, 0.2]), 10_000.0));
        let result = valuator
            .valuate(&DomainInput::parse("crypto.ai"), &hot_market())
            .await
            .unwrap();
        assert_eq!(result.model, ModelKind::Heuristic);
    }

    #[tokio::test]
    async fn test_load_failure_matches_heuristic_only() {
        let valuator = Valuator::heuristic_only().with_registry(ModelRegistry::with_loader(
            || async { Err(ModelError::Inference("no runtime".to_string())) },
            Duration::from_secs(1),
        ));
        let domain = DomainInput::parse("pay.io");
        let market = MarketContext::default();

        let a = valuator.valuate(&domain, &market).await.unwrap();
        let b = Valuator::heuristic_only()
            .valuate(&domain, &market)
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(valuator.registry().mode(), Some(ModelKind::Heuristic));
    }

    #[tokio::test]
    async fn test_invalid_domain_is_reported() {
        let valuator = Valuator::heuristic_only();
        let result = valuator
            .valuate(&DomainInput::parse(""), &MarketContext::default())
            .await;
        assert!(matches!(
            result,
            Err(ValuationError::InvalidInput(InputError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn test_negative_price_is_reported() {
        let valuator = Valuator::heuristic_only();
        let domain = DomainInput::parse("shop.com").with_price_history(vec![100.0, -5.0]);
        let result = valuator.valuate(&domain, &MarketContext::default()).await;
        assert!(matches!(
            result,
            Err(ValuationError::InvalidInput(InputError::InvalidPrice { index: 1, .. }))
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_market_is_reported() {
        let valuator = Valuator::heuristic_only();
        let market = MarketContext::new(1.5, 0.2, 0.1, 100.0);
        let result = valuator
            .valuate(&DomainInput::parse("shop.com"), &market)
            .await;
        assert!(matches!(result, Err(ValuationError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_full_history_raises_confidence() {
        let valuator = Valuator::heuristic_only();
        let bare = DomainInput::parse("shop.com");
        let rich = DomainInput::parse("shop.com")
            .with_registered_at(1_000_000_000)
            .with_price_history(vec![1000.0, 1500.0, 2400.0])
            .with_previous_sales(vec![1800.0])
            .with_traffic(TrafficStats::new(12_000, 0.35, 180.0));
        let market = MarketContext::default();

        let bare = valuator.valuate(&bare, &market).await.unwrap();
        let rich = valuator.valuate(&rich, &market).await.unwrap();
        assert!(rich.confidence > bare.confidence);
        assert!(rich.confidence <= 1.0);
    }

    #[tokio::test]
    async fn test_custom_base_value() {
        let mut config = ValuatorConfig::heuristic_only();
        config.base_value = 2000.0;
        let doubled = Valuator::new(config).unwrap();
        let standard = Valuator::heuristic_only();
        let domain = DomainInput::parse("crypto.ai");

        let a = doubled.valuate(&domain, &hot_market()).await.unwrap();
        let b = standard.valuate(&domain, &hot_market()).await.unwrap();
        assert!((a.value - 2.0 * b.value).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ValuatorConfig::default();
        config.output_scale = 0.0;
        assert!(matches!(
            Valuator::new(config),
            Err(ValuationError::Config(_))
        ));
    }

    #[test]
    fn test_report_tracks_value() {
        let valuator = Valuator::heuristic_only();
        let result = tokio_test::block_on(
            valuator.valuate(&DomainInput::parse("crypto.ai"), &hot_market()),
        )
        .unwrap();
        assert!((result.report.target_low - result.value * 0.8).abs() < 1e-9);
        assert!((result.report.target_high - result.value * 1.2).abs() < 1e-9);
        assert_eq!(result.report.segment.as_str(), "Cryptocurrency & Blockchain");
    }
}

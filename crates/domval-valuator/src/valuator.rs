//! Core Valuator implementation

use crate::config::ValuatorConfig;
use crate::error::ValuationError;
use crate::registry::ModelRegistry;
use domval_domain::adjustment::{combine, sentiment_score, trend_adjustment};
use domval_domain::confidence::estimate_confidence;
use domval_domain::extraction::FeatureExtractor;
use domval_domain::insights::{comparable_domains, market_insights, value_drivers};
use domval_domain::{
    DomainInput, FeatureSet, InvestmentReport, MarketContext, ModelBackend, ModelKind,
    ValuationResult, ValuationTables,
};
use domval_model::{HeuristicModel, LearnedModel};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// The Valuator turns a domain and its market context into a valuation
pub struct Valuator {
    config: ValuatorConfig,
    tables: ValuationTables,
    heuristic: HeuristicModel,
    registry: ModelRegistry,
}

impl Valuator {
    /// Create a new Valuator
    ///
    /// The learned model named by `config` is not loaded here; the first
    /// valuation resolves it.
    pub fn new(config: ValuatorConfig) -> Result<Self, ValuationError> {
        config.validate().map_err(ValuationError::Config)?;

        if config.wants_learned_model() {
            info!("Valuator created; learned model will load on first use");
        } else {
            info!("Valuator created in heuristic-only mode");
        }

        Ok(Self {
            heuristic: HeuristicModel::new(config.base_value),
            registry: ModelRegistry::from_config(&config),
            tables: ValuationTables::standard().clone(),
            config,
        })
    }

    /// Valuator that never consults a learned model
    pub fn heuristic_only() -> Self {
        let config = ValuatorConfig::heuristic_only();
        Self {
            heuristic: HeuristicModel::new(config.base_value),
            registry: ModelRegistry::disabled(),
            tables: ValuationTables::standard().clone(),
            config,
        }
    }

    /// Replace the lookup tables
    pub fn with_tables(mut self, tables: ValuationTables) -> Self {
        self.tables = tables;
        self
    }

    /// Replace the model registry
    pub fn with_registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use an already loaded learned model
    pub fn with_learned_model(self, model: LearnedModel) -> Self {
        self.with_registry(ModelRegistry::preloaded(model))
    }

    /// Active configuration
    pub fn config(&self) -> &ValuatorConfig {
        &self.config
    }

    /// Lookup tables in use
    pub fn tables(&self) -> &ValuationTables {
        &self.tables
    }

    /// Learned model registry
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Validate inputs and extract the feature set
    pub fn features(
        &self,
        domain: &DomainInput,
        market: &MarketContext,
    ) -> Result<FeatureSet, ValuationError> {
        domain.validate()?;
        market.validate()?;
        Ok(FeatureExtractor::new(&self.tables).extract(domain, market))
    }

    /// Valuate a domain
    ///
    /// Only input contract violations are returned as errors. A missing or
    /// failing learned model falls back to the heuristic.
    pub async fn valuate(
        &self,
        domain: &DomainInput,
        market: &MarketContext,
    ) -> Result<ValuationResult, ValuationError> {
        let features = self.features(domain, market)?;
        Ok(self.valuate_features(domain, market, &features).await)
    }

    /// Run the pipeline on an already extracted feature set
    pub async fn valuate_features(
        &self,
        domain: &DomainInput,
        market: &MarketContext,
        features: &FeatureSet,
    ) -> ValuationResult {
        let (base, model) = self.base_value(features).await;
        let trend = trend_adjustment(features);
        let sentiment = sentiment_score(features);
        let value = combine(base, trend, sentiment);

        debug!(
            "{}: base {:.2} ({}), trend {:.4}, sentiment {:.4}, value {:.2}",
            domain.name(),
            base,
            model,
            trend,
            sentiment,
            value
        );

        ValuationResult {
            domain: domain.name().to_string(),
            value,
            confidence: estimate_confidence(features),
            value_drivers: value_drivers(features),
            comparable_domains: comparable_domains(domain.name(), &self.tables),
            market_insights: market_insights(features),
            model,
            report: InvestmentReport::build(domain.sld(), value, sentiment, market),
        }
    }

    /// Base value from the learned model, or the heuristic when it is absent or fails
    pub async fn base_value(&self, features: &FeatureSet) -> (f64, ModelKind) {
        match self.try_learned_model(features).await {
            Some(value) => (value, ModelKind::Learned),
            None => (self.heuristic.value(features), ModelKind::Heuristic),
        }
    }

    /// Score with the learned model, if one is loaded and it succeeds
    pub async fn try_learned_model(&self, features: &FeatureSet) -> Option<f64> {
        let model = self.registry.resolve().await?;
        match panic::catch_unwind(AssertUnwindSafe(|| model.score(features))) {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!(
                    "Learned model '{}' failed, using heuristic model: {}",
                    model.name(),
                    e
                );
                None
            }
            Err(_) => {
                warn!(
                    "Learned model '{}' panicked, using heuristic model",
                    model.name()
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for Valuator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Valuator")
            .field("config", &self.config)
            .field("heuristic", &self.heuristic)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

//! Configuration for the Valuator

use domval_model::heuristic::DEFAULT_BASE_VALUE;
use domval_model::learned::DEFAULT_OUTPUT_SCALE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Valuator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuatorConfig {
    /// Local learned-model artifact; takes precedence over `model_url`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,

    /// Remote learned-model artifact, fetched once on first use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,

    /// Upper bound on loading the learned model (seconds)
    pub model_load_timeout_secs: u64,

    /// Factor from raw learned-model output to currency units
    pub output_scale: f64,

    /// Base value of the heuristic formula
    pub base_value: f64,

    /// Whether to attempt loading a learned model at all
    pub learned_model_enabled: bool,
}

impl ValuatorConfig {
    /// Get the model load timeout as a Duration
    pub fn model_load_timeout(&self) -> Duration {
        Duration::from_secs(self.model_load_timeout_secs)
    }

    /// Whether a learned model will be attempted on first use
    pub fn wants_learned_model(&self) -> bool {
        self.learned_model_enabled && (self.model_path.is_some() || self.model_url.is_some())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model_load_timeout_secs == 0 {
            return Err("model_load_timeout_secs must be greater than 0".to_string());
        }
        if !self.output_scale.is_finite() || self.output_scale <= 0.0 {
            return Err("output_scale must be a positive number".to_string());
        }
        if !self.base_value.is_finite() || self.base_value < 0.0 {
            return Err("base_value must be a non-negative number".to_string());
        }
        if let Some(url) = &self.model_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("model_url must be an http(s) URL, got '{}'", url));
            }
        }
        Ok(())
    }
}

impl Default for ValuatorConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            model_url: None,
            model_load_timeout_secs: 5,
            output_scale: DEFAULT_OUTPUT_SCALE,
            base_value: DEFAULT_BASE_VALUE,
            learned_model_enabled: true,
        }
    }
}

impl ValuatorConfig {
    /// Heuristic-only preset: never attempts a learned model
    pub fn heuristic_only() -> Self {
        Self {
            learned_model_enabled: false,
            ..Self::default()
        }
    }

    /// Learned model from a local artifact
    pub fn with_model_path(path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

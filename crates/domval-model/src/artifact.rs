//! Model artifact loading
//!
//! A learned model ships as a small JSON document:
//!
//! ```json
//! {
//!   "version": "linear-2024-06",
//!   "weights": [0.0, 0.0, 0.1, 0.3, 0.0, 0.2, 0.05, 0.0, -0.05, 0.1, 0.05, 0.1, 0.1, 0.0],
//!   "bias": 0.05,
//!   "output_scale": 10000.0
//! }
//! ```
//!
//! Weights follow the `FeatureVector` order. `output_scale` is optional; when
//! omitted the caller's configured scale applies.
//!
//! Artifacts are read from a local path or fetched once over HTTP(S). Neither
//! path retries: a failed load is reported and the caller falls back.

use crate::learned::{LearnedModel, LinearRegressor};
use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Serialized linear-regression model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Free-form version tag, used as the model name in logs
    pub version: String,

    /// One weight per feature, in feature-vector order
    pub weights: Vec<f64>,

    /// Intercept
    #[serde(default)]
    pub bias: f64,

    /// Factor from raw output to currency units, if the artifact fixes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_scale: Option<f64>,
}

impl ModelArtifact {
    /// Decode an artifact from JSON
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read an artifact from a local file
    pub async fn load_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        debug!("Reading model artifact from {}", path.display());
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_json(&contents)
    }

    /// Fetch an artifact over HTTP(S), once
    pub async fn fetch(url: &str, timeout: Duration) -> Result<Self, ModelError> {
        debug!("Fetching model artifact from {}", url);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let response = client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::Http(format!("HTTP {} fetching {}", status, url)));
        }

        let body = response.text().await?;
        Self::from_json(&body)
    }

    /// Build a learned model from this artifact
    ///
    /// `default_scale` applies when the artifact carries no `output_scale`.
    pub fn into_model(self, default_scale: f64) -> Result<LearnedModel, ModelError> {
        let scale = self.output_scale.unwrap_or(default_scale);
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ModelError::InvalidArtifact(format!(
                "output scale must be positive, got {}",
                scale
            )));
        }

        let regressor = LinearRegressor::new(&self.weights, self.bias)?;
        Ok(LearnedModel::new(regressor, scale).with_name(self.version))
    }
}

//! Learned model backend
//!
//! A [`LearnedModel`] serializes the feature set into the fixed-order
//! [`FeatureVector`], hands it to a [`Regressor`], and scales the single
//! output to currency units. Any deviation from that contract is a
//! [`ModelError`]; the caller decides how to fall back.

use crate::ModelError;
use domval_domain::{FeatureSet, FeatureVector, ModelBackend, FEATURE_DIMENSIONS};

/// Default factor from raw model output to currency units
pub const DEFAULT_OUTPUT_SCALE: f64 = 10_000.0;

/// A loaded regression model
///
/// Takes the fixed-order feature vector and returns the raw output tensor,
/// flattened. A well-formed regression output has exactly one element.
pub trait Regressor: Send + Sync {
    /// Run inference
    fn predict(&self, input: &FeatureVector) -> Result<Vec<f64>, ModelError>;
}

/// Linear regression: `bias + Σ wᵢ·xᵢ`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    weights: [f64; FEATURE_DIMENSIONS],
    bias: f64,
}

impl LinearRegressor {
    /// Create a regressor from exactly [`FEATURE_DIMENSIONS`] weights
    pub fn new(weights: &[f64], bias: f64) -> Result<Self, ModelError> {
        let weights: [f64; FEATURE_DIMENSIONS] =
            weights
                .try_into()
                .map_err(|_| ModelError::DimensionMismatch {
                    expected: FEATURE_DIMENSIONS,
                    actual: weights.len(),
                })?;

        if weights.iter().any(|w| !w.is_finite()) || !bias.is_finite() {
            return Err(ModelError::InvalidArtifact(
                "weights and bias must be finite".to_string(),
            ));
        }

        Ok(Self { weights, bias })
    }

    /// Model weights in feature-vector order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Intercept
    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, input: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        let dot: f64 = self
            .weights
            .iter()
            .zip(input.as_slice())
            .map(|(w, x)| w * x)
            .sum();
        Ok(vec![self.bias + dot])
    }
}

/// Model backend wrapping an externally loaded regressor
pub struct LearnedModel {
    regressor: Box<dyn Regressor>,
    output_scale: f64,
    name: String,
}

impl LearnedModel {
    /// Wrap a regressor, scaling its output by `output_scale`
    pub fn new(regressor: impl Regressor + 'static, output_scale: f64) -> Self {
        Self {
            regressor: Box::new(regressor),
            output_scale,
            name: "learned".to_string(),
        }
    }

    /// Set the name reported in logs (e.g. the artifact version)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Factor from raw output to currency units
    pub fn output_scale(&self) -> f64 {
        self.output_scale
    }
}

impl std::fmt::Debug for LearnedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearnedModel")
            .field("name", &self.name)
            .field("output_scale", &self.output_scale)
            .finish_non_exhaustive()
    }
}

impl ModelBackend for LearnedModel {
    type Error = ModelError;

    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, features: &FeatureSet) -> Result<f64, Self::Error> {
        let input = features.to_vector();
        let output = self.regressor.predict(&input)?;

        let raw = match output.as_slice() {
            [raw] => *raw,
            other => {
                return Err(ModelError::MalformedOutput(format!(
                    "expected a single output value, got {}",
                    other.len()
                )))
            }
        };

        if !raw.is_finite() {
            return Err(ModelError::MalformedOutput(format!(
                "output {} is not finite",
                raw
            )));
        }
        if raw < 0.0 {
            return Err(ModelError::MalformedOutput(format!(
                "output {} is negative",
                raw
            )));
        }

        let value = raw * self.output_scale;
        if !value.is_finite() {
            return Err(ModelError::MalformedOutput(format!(
                "scaled output {} is not finite",
                value
            )));
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockRegressor;
    use domval_domain::extraction::FeatureExtractor;
    use domval_domain::{DomainInput, MarketContext, ValuationTables};

    fn features() -> FeatureSet {
        FeatureExtractor::new(ValuationTables::standard()).extract_at(
            &DomainInput::parse("crypto.ai"),
            &MarketContext::new(0.9, 0.2, 0.1, 8000.0),
            1_750_000_000,
        )
    }

    #[test]
    fn test_scales_single_output() {
        let model = LearnedModel::new(MockRegressor::new(vec![0.5]), DEFAULT_OUTPUT_SCALE);
        assert_eq!(model.score(&features()).unwrap(), 5000.0);
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let model = LearnedModel::new(MockRegressor::new(vec![0.5, 0.2]), DEFAULT_OUTPUT_SCALE);
        assert!(matches!(model.score(&features()), Err(ModelError::MalformedOutput(_))));

        let model = LearnedModel::new(MockRegressor::new(vec![]), DEFAULT_OUTPUT_SCALE);
        assert!(matches!(model.score(&features()), Err(ModelError::MalformedOutput(_))));
    }

    #[test]
    fn test_rejects_non_finite_and_negative() {
        for raw in [f64::NAN, f64::INFINITY, -0.1] {
            let model = LearnedModel::new(MockRegressor::new(vec![raw]), DEFAULT_OUTPUT_SCALE);
            assert!(matches!(model.score(&features()), Err(ModelError::MalformedOutput(_))));
        }
    }

    #[test]
    fn test_propagates_inference_error() {
        let model = LearnedModel::new(MockRegressor::failing("oom"), DEFAULT_OUTPUT_SCALE);
        assert!(matches!(model.score(&features()), Err(ModelError::Inference(_))));
    }

    #[test]
    fn test_linear_regressor() {
        let mut weights = [0.0; FEATURE_DIMENSIONS];
        weights[0] = 0.01; // length
        weights[5] = 0.1; // tld_popularity
        let regressor = LinearRegressor::new(&weights, 0.05).unwrap();

        let features = features();
        let expected = 0.05 + 0.01 * features.linguistic.length + 0.1 * features.market.tld_popularity;
        let output = regressor.predict(&features.to_vector()).unwrap();
        assert_eq!(output.len(), 1);
        assert!((output[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_linear_regressor_dimension_check() {
        let result = LinearRegressor::new(&[1.0, 2.0, 3.0], 0.0);
        assert!(matches!(
            result,
            Err(ModelError::DimensionMismatch { expected: 14, actual: 3 })
        ));
    }

    #[test]
    fn test_linear_regressor_rejects_nan_weight() {
        let mut weights = [0.0; FEATURE_DIMENSIONS];
        weights[3] = f64::NAN;
        assert!(matches!(
            LinearRegressor::new(&weights, 0.0),
            Err(ModelError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_name_override() {
        let model = LearnedModel::new(MockRegressor::new(vec![0.1]), 1.0).with_name("linear-v3");
        assert_eq!(model.name(), "linear-v3");
    }
}

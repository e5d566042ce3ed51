//! Domval Model Layer
//!
//! Pluggable implementations of the `ModelBackend` trait from `domval-domain`.
//!
//! # Backends
//!
//! - `HeuristicModel`: deterministic weighted-multiplier formula, never fails
//! - `LearnedModel`: wraps any `Regressor` (such as a `LinearRegressor`
//!   loaded from a JSON artifact) and scales its output to currency units
//! - `MockRegressor`: deterministic regressor for testing
//!
//! # Examples
//!
//! ```
//! use domval_domain::extraction::FeatureExtractor;
//! use domval_domain::{DomainInput, MarketContext, ModelBackend, ValuationTables};
//! use domval_model::{HeuristicModel, LearnedModel, MockRegressor};
//!
//! let features = FeatureExtractor::new(ValuationTables::standard())
//!     .extract(&DomainInput::parse("crypto.ai"), &MarketContext::default());
//!
//! let heuristic = HeuristicModel::default();
//! assert!(heuristic.score(&features).unwrap() > 1000.0);
//!
//! let learned = LearnedModel::new(MockRegressor::new(vec![0.25]), 10_000.0);
//! assert_eq!(learned.score(&features).unwrap(), 2500.0);
//! ```

#![warn(missing_docs)]

pub mod artifact;
pub mod heuristic;
pub mod learned;

use domval_domain::FeatureVector;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use artifact::ModelArtifact;
pub use heuristic::HeuristicModel;
pub use learned::{LearnedModel, LinearRegressor, Regressor};

/// Errors that can occur while loading or running a learned model
#[derive(Error, Debug)]
pub enum ModelError {
    /// Reading a local artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching a remote artifact failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Artifact could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Artifact weights do not match the feature vector
    #[error("Dimension mismatch: expected {expected} weights, got {actual}")]
    DimensionMismatch {
        /// Expected number of weights
        expected: usize,
        /// Number of weights found
        actual: usize,
    },

    /// Artifact contents are structurally valid but unusable
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Model output had the wrong shape or an impossible value
    #[error("Malformed output: {0}")]
    MalformedOutput(String),

    /// Inference itself failed
    #[error("Inference error: {0}")]
    Inference(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for ModelError {
    fn from(e: reqwest::Error) -> Self {
        ModelError::Http(e.to_string())
    }
}

/// Mock regressor for deterministic testing
///
/// Returns a pre-configured output vector (or error) without doing any math.
///
/// # Examples
///
/// ```
/// use domval_domain::FeatureVector;
/// use domval_model::{MockRegressor, Regressor};
///
/// let regressor = MockRegressor::new(vec![0.5]);
/// let input = FeatureVector([0.0; 14]);
/// assert_eq!(regressor.predict(&input).unwrap(), vec![0.5]);
///
/// let failing = MockRegressor::failing("boom");
/// assert!(failing.predict(&input).is_err());
/// assert_eq!(failing.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockRegressor {
    output: Result<Vec<f64>, String>,
    call_count: Arc<Mutex<usize>>,
}

impl MockRegressor {
    /// Create a mock returning `output` for every input
    pub fn new(output: Vec<f64>) -> Self {
        Self {
            output: Ok(output),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose every prediction fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            output: Err(message.into()),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of times predict was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Regressor for MockRegressor {
    fn predict(&self, _input: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        *self.call_count.lock().unwrap() += 1;

        match &self.output {
            Ok(output) => Ok(output.clone()),
            Err(message) => Err(ModelError::Inference(message.clone())),
        }
    }
}

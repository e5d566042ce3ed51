//! Learned model registry
//!
//! Resolves the learned model at most once. The first caller runs the
//! loader under a timeout; concurrent callers await that same attempt.
//! A load that fails, panics or times out leaves the registry
//! permanently empty, so every later call goes straight to the heuristic.

use crate::config::ValuatorConfig;
use domval_domain::{ModelBackend, ModelKind};
use domval_model::{LearnedModel, ModelArtifact, ModelError};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::{debug, info, warn};

type LoadFuture = Pin<Box<dyn Future<Output = Result<LearnedModel, ModelError>> + Send>>;
type LoadFn = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

/// One-shot holder for the learned model
pub struct ModelRegistry {
    state: OnceCell<Option<Arc<LearnedModel>>>,
    loader: Option<LoadFn>,
    load_timeout: Duration,
}

impl ModelRegistry {
    /// Registry that never holds a learned model
    pub fn disabled() -> Self {
        Self {
            state: OnceCell::new_with(Some(None)),
            loader: None,
            load_timeout: Duration::ZERO,
        }
    }

    /// Registry holding an already loaded model
    pub fn preloaded(model: LearnedModel) -> Self {
        Self {
            state: OnceCell::new_with(Some(Some(Arc::new(model)))),
            loader: None,
            load_timeout: Duration::ZERO,
        }
    }

    /// Registry that runs `load` on first use, bounded by `load_timeout`
    pub fn with_loader<F, Fut>(load: F, load_timeout: Duration) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<LearnedModel, ModelError>> + Send + 'static,
    {
        let loader: LoadFn = Arc::new(move || -> LoadFuture { Box::pin(load()) });
        Self {
            state: OnceCell::new(),
            loader: Some(loader),
            load_timeout,
        }
    }

    /// Registry for the artifact named by `config`
    ///
    /// A local path wins over a URL. With neither, or with learned models
    /// disabled, the registry is [`disabled`](Self::disabled).
    pub fn from_config(config: &ValuatorConfig) -> Self {
        if !config.learned_model_enabled {
            return Self::disabled();
        }

        let scale = config.output_scale;
        let load_timeout = config.model_load_timeout();

        if let Some(path) = config.model_path.clone() {
            return Self::with_loader(
                move || {
                    let path = path.clone();
                    async move { ModelArtifact::load_path(&path).await?.into_model(scale) }
                },
                load_timeout,
            );
        }

        if let Some(url) = config.model_url.clone() {
            return Self::with_loader(
                move || {
                    let url = url.clone();
                    async move {
                        ModelArtifact::fetch(&url, load_timeout)
                            .await?
                            .into_model(scale)
                    }
                },
                load_timeout,
            );
        }

        Self::disabled()
    }

    /// The learned model, loading it on first call
    pub async fn resolve(&self) -> Option<Arc<LearnedModel>> {
        self.state.get_or_init(|| self.load()).await.clone()
    }

    /// Whether the one load attempt has completed
    pub fn is_resolved(&self) -> bool {
        self.state.initialized()
    }

    /// Backend in effect, once resolved
    pub fn mode(&self) -> Option<ModelKind> {
        self.state.get().map(|model| match model {
            Some(_) => ModelKind::Learned,
            None => ModelKind::Heuristic,
        })
    }

    async fn load(&self) -> Option<Arc<LearnedModel>> {
        let Some(loader) = &self.loader else {
            debug!("No learned model configured, using heuristic model");
            return None;
        };

        // The loader runs on its own task so a panic surfaces as a JoinError
        let mut task = tokio::spawn(loader());
        match timeout(self.load_timeout, &mut task).await {
            Ok(Ok(Ok(model))) => {
                info!("Loaded learned model '{}'", model.name());
                Some(Arc::new(model))
            }
            Ok(Ok(Err(e))) => {
                warn!("Learned model unavailable, using heuristic model: {}", e);
                None
            }
            Ok(Err(e)) => {
                warn!("Learned model loader aborted, using heuristic model: {}", e);
                None
            }
            Err(_) => {
                task.abort();
                warn!(
                    "Learned model load timed out after {:?}, using heuristic model",
                    self.load_timeout
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("mode", &self.mode())
            .field("has_loader", &self.loader.is_some())
            .field("load_timeout", &self.load_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domval_model::MockRegressor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_loader(
        calls: Arc<AtomicUsize>,
        delay: Duration,
        result: Result<f64, &'static str>,
    ) -> ModelRegistry {
        ModelRegistry::with_loader(
            move || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(delay).await;
                    match result {
                        Ok(output) => Ok(LearnedModel::new(MockRegressor::new(vec![output]), 1.0)),
                        Err(message) => Err(ModelError::Inference(message.to_string())),
                    }
                }
            },
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_disabled_registry() {
        let registry = ModelRegistry::disabled();
        assert!(registry.is_resolved());
        assert!(registry.resolve().await.is_none());
        assert_eq!(registry.mode(), Some(ModelKind::Heuristic));
    }

    #[tokio::test]
    async fn test_preloaded_registry() {
        let registry =
            ModelRegistry::preloaded(LearnedModel::new(MockRegressor::new(vec![0.1]), 1.0));
        assert!(registry.resolve().await.is_some());
        assert_eq!(registry.mode(), Some(ModelKind::Learned));
    }

    #[tokio::test]
    async fn test_lazy_until_first_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = counting_loader(calls.clone(), Duration::ZERO, Ok(0.2));

        assert!(!registry.is_resolved());
        assert_eq!(registry.mode(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(registry.resolve().await.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_calls_load_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = Arc::new(counting_loader(
            calls.clone(),
            Duration::from_millis(50),
            Ok(0.3),
        ));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.resolve().await })
            })
            .collect();

        let mut models = Vec::new();
        for handle in handles {
            models.push(handle.await.unwrap().expect("model should load"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(models.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    }

    #[tokio::test]
    async fn test_failure_is_permanent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = counting_loader(calls.clone(), Duration::ZERO, Err("no runtime"));

        assert!(registry.resolve().await.is_none());
        assert!(registry.resolve().await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.mode(), Some(ModelKind::Heuristic));
    }

    async fn crashing_load() -> Result<LearnedModel, ModelError> {
        panic!("artifact decoder crashed")
    }

    #[tokio::test]
    async fn test_panicking_loader_is_permanent_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader_calls = calls.clone();
        let registry = ModelRegistry::with_loader(
            move || {
                loader_calls.fetch_add(1, Ordering::SeqCst);
                crashing_load()
            },
            Duration::from_secs(1),
        );

        assert!(registry.resolve().await.is_none());
        assert!(registry.resolve().await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.mode(), Some(ModelKind::Heuristic));
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader_calls = calls.clone();
        let registry = ModelRegistry::with_loader(
            move || {
                let calls = loader_calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(LearnedModel::new(MockRegressor::new(vec![0.1]), 1.0))
                }
            },
            Duration::from_millis(50),
        );

        assert!(registry.resolve().await.is_none());
        assert!(registry.resolve().await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_from_config_missing_artifact() {
        let config = ValuatorConfig::with_model_path("/nonexistent/domval/model.json");
        let registry = ModelRegistry::from_config(&config);
        assert!(!registry.is_resolved());
        assert!(registry.resolve().await.is_none());
    }

    #[tokio::test]
    async fn test_from_config_disabled() {
        let mut config = ValuatorConfig::with_model_path("/nonexistent/domval/model.json");
        config.learned_model_enabled = false;
        assert!(ModelRegistry::from_config(&config).is_resolved());
        assert!(ModelRegistry::from_config(&ValuatorConfig::default()).is_resolved());
    }
}

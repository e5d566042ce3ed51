//! Process-wide valuator
//!
//! `init` installs a valuator, a later `init` replaces it, and `shutdown`
//! removes it. `valuate` installs a heuristic-only valuator when none is
//! present.

use crate::config::ValuatorConfig;
use crate::error::ValuationError;
use crate::valuator::Valuator;
use domval_domain::{DomainInput, MarketContext, ValuationResult};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::info;

static GLOBAL: OnceLock<RwLock<Option<Arc<Valuator>>>> = OnceLock::new();

fn slot() -> &'static RwLock<Option<Arc<Valuator>>> {
    GLOBAL.get_or_init(|| RwLock::new(None))
}

/// Build a valuator from `config` and install it process-wide
pub fn init(config: ValuatorConfig) -> Result<(), ValuationError> {
    install(Valuator::new(config)?);
    Ok(())
}

/// Install a prepared valuator process-wide, replacing any previous one
pub fn install(valuator: Valuator) {
    let previous = slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(Arc::new(valuator));
    if previous.is_some() {
        info!("Replaced process-wide valuator");
    }
}

/// Remove the process-wide valuator
///
/// Returns whether one was installed. In-flight valuations keep their
/// handle and complete normally.
pub fn shutdown() -> bool {
    slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .is_some()
}

/// Whether a process-wide valuator is installed
pub fn is_initialized() -> bool {
    slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// The process-wide valuator, installing a heuristic-only one if needed
pub fn current() -> Arc<Valuator> {
    if let Some(valuator) = slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return valuator.clone();
    }

    slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(|| Arc::new(Valuator::heuristic_only()))
        .clone()
}

/// Valuate a domain with the process-wide valuator
pub async fn valuate(
    domain: DomainInput,
    market: MarketContext,
) -> Result<ValuationResult, ValuationError> {
    current().valuate(&domain, &market).await
}

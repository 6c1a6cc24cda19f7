//! Model resolution against the remote catalog.
//!
//! The catalog is versioned and unreliable: identifiers appear, get aliased, and
//! retire. [`select_model`] picks the best available identifier for a fixed
//! preference order; [`ModelResolver`] memoizes that choice for the life of the
//! process and degrades to a static default instead of ever surfacing an error.

use crate::llm::candidates::ModelPreferences;
use crate::llm::gateway::LlmGateway;
use crate::llm::models::ModelDescriptor;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Pick the best generation-capable identifier from a catalog.
///
/// First-match-wins double loop: preference rank dominates catalog order. When no
/// pattern matches, the first available entry wins; when nothing is available, the
/// static default does.
pub fn select_model(catalog: &[ModelDescriptor], preferences: &ModelPreferences) -> String {
    let available: Vec<&ModelDescriptor> =
        catalog.iter().filter(|m| m.supports_generation()).collect();

    for pattern in &preferences.preferred {
        for model in &available {
            if model.name.contains(pattern.as_str()) {
                return model.name.clone();
            }
        }
    }

    match available.first() {
        Some(model) => model.name.clone(),
        None => preferences.default_fallback.clone(),
    }
}

/// Resolves and caches the working model identifier for this process.
///
/// The catalog listing runs at most once; concurrent first callers share the
/// single in-flight resolution. `resolve` never returns an error.
pub struct ModelResolver {
    gateway: Arc<dyn LlmGateway>,
    preferences: ModelPreferences,
    resolved: OnceCell<String>,
}

impl ModelResolver {
    pub fn new(gateway: Arc<dyn LlmGateway>, preferences: ModelPreferences) -> Self {
        Self {
            gateway,
            preferences,
            resolved: OnceCell::new(),
        }
    }

    /// The resolved model identifier, computing it on first call.
    pub async fn resolve(&self) -> &str {
        self.resolved
            .get_or_init(|| async {
                match self.gateway.list_models().await {
                    Ok(catalog) => {
                        let chosen = select_model(&catalog, &self.preferences);
                        info!(model = %chosen, "Resolved model from catalog");
                        chosen
                    }
                    Err(e) => {
                        warn!(error = %e, fallback = %self.preferences.default_fallback,
                            "Model listing failed, using static fallback");
                        self.preferences.default_fallback.clone()
                    }
                }
            })
            .await
    }

    pub fn preferences(&self) -> &ModelPreferences {
        &self.preferences
    }
}

use crate::error::{Result, VerdiError};
use crate::llm::gateway::{GenerationConfig, LlmGateway};
use crate::llm::models::GenerationRequest;
use std::sync::Arc;
use tracing::{info, warn};

/// Main interface for generation calls.
///
/// Wraps a gateway with the fallback policy: a primary identifier is tried first,
/// and alternates are consulted only for "wrong model" class failures.
pub struct LlmBroker {
    gateway: Arc<dyn LlmGateway>,
    config: GenerationConfig,
}

impl LlmBroker {
    /// Create a broker with the default generation configuration
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self::with_config(gateway, GenerationConfig::default())
    }

    pub fn with_config(gateway: Arc<dyn LlmGateway>, config: GenerationConfig) -> Self {
        Self { gateway, config }
    }

    /// Run one generation call against a single model, no fallback
    pub async fn generate(&self, model: &str, request: &GenerationRequest) -> Result<String> {
        self.gateway.generate(model, request, &self.config).await
    }

    /// Run one generation call, falling back along `fallback_chain` when a
    /// candidate turns out to be the wrong model for the request.
    ///
    /// The first success wins and no further candidates are tried. An error that
    /// is not a "wrong model" rejection (quota, auth, network, timeout) ends the
    /// call immediately without consulting the chain. When every candidate is
    /// rejected, the last error is surfaced; earlier ones are only logged.
    pub async fn generate_with_fallback(
        &self,
        request: &GenerationRequest,
        primary: &str,
        fallback_chain: &[String],
    ) -> Result<String> {
        let mut last_error: Option<VerdiError> = None;

        for candidate in std::iter::once(primary).chain(fallback_chain.iter().map(String::as_str))
        {
            match self.gateway.generate(candidate, request, &self.config).await {
                Ok(text) => {
                    info!(model = candidate, "Generation succeeded");
                    return Ok(text);
                }
                Err(e) if e.is_model_unsupported() => {
                    warn!(model = candidate, error = %e, "Model rejected request, trying next candidate");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            VerdiError::GatewayError("no candidate models to try".to_string())
        }))
    }
}

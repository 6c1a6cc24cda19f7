use crate::error::Result;
use crate::llm::models::{GenerationRequest, ModelDescriptor};
use async_trait::async_trait;

/// Configuration for a generation call
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_output_tokens: 2048,
        }
    }
}

/// Abstract interface for LLM providers
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Run one generation call against a specific model identifier
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
        config: &GenerationConfig,
    ) -> Result<String>;

    /// Fetch the remote model catalog
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_default() {
        let config = GenerationConfig::default();

        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.max_output_tokens, 2048);
    }

    #[test]
    fn test_generation_config_custom() {
        let config = GenerationConfig {
            temperature: 0.4,
            max_output_tokens: 1024,
        };

        assert_eq!(config.temperature, 0.4);
        assert_eq!(config.max_output_tokens, 1024);
    }

    #[test]
    fn test_generation_config_clone() {
        let config1 = GenerationConfig {
            temperature: 0.7,
            max_output_tokens: 512,
        };

        let config2 = config1.clone();

        assert_eq!(config1.temperature, config2.temperature);
        assert_eq!(config1.max_output_tokens, config2.max_output_tokens);
    }
}

//! Gemini Gateway for LLM interactions.
//!
//! This module provides a gateway for the Google Generative Language API,
//! covering content generation (text and vision) and model catalog listing.

use crate::error::{Result, VerdiError};
use crate::llm::gateway::{GenerationConfig, LlmGateway};
use crate::llm::models::{GenerationRequest, ModelDescriptor};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

/// Configuration for connecting to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<std::time::Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("GOOGLE_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .unwrap_or_default(),
            base_url: std::env::var("GEMINI_API_ENDPOINT")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            timeout: Some(std::time::Duration::from_secs(60)),
        }
    }
}

/// Gateway for the Gemini API.
///
/// Supports text generation, vision requests with inline image payloads, and
/// listing the model catalog available to the configured API key.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    /// Create a gateway from the environment, failing fast when no API key is set.
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::default();
        if config.api_key.is_empty() {
            return Err(VerdiError::ConfigError(
                "no API key found; set GOOGLE_API_KEY or GEMINI_API_KEY".to_string(),
            ));
        }
        Ok(Self::with_config(config))
    }

    /// Create a gateway with custom configuration.
    pub fn with_config(config: GeminiConfig) -> Self {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().unwrap();

        Self { client, config }
    }

    /// Create a gateway with a custom API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::with_config(GeminiConfig {
            api_key: api_key.into(),
            ..Default::default()
        })
    }

    /// Create a gateway with a custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_config(GeminiConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Default::default()
        })
    }
}

// Catalog names arrive as "models/gemini-...", callers may pass bare identifiers
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Map a non-success generation response to a typed error.
///
/// 404 means the identifier is unknown or retired; a 400 whose message says the
/// input is not supported means the model rejected the modality. Both classify
/// as [`VerdiError::ModelUnsupported`] so the fallback chain can advance.
/// Everything else stays a terminal API error.
fn classify_api_error(model: &str, status: StatusCode, message: String) -> VerdiError {
    match status.as_u16() {
        404 => VerdiError::ModelUnsupported {
            model: model.to_string(),
            message,
        },
        400 if message.contains("not supported") || message.contains("does not support") => {
            VerdiError::ModelUnsupported {
                model: model.to_string(),
                message,
            }
        }
        status => VerdiError::Api { status, message },
    }
}

// Pull the human-readable message out of the API error envelope, if there is one
fn extract_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.to_string()
            } else {
                body.to_string()
            }
        })
}

fn build_request_body(request: &GenerationRequest, config: &GenerationConfig) -> Value {
    let mut parts = vec![serde_json::json!({"text": request.prompt})];

    if let Some(image) = &request.image {
        let encoded =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &image.data);
        parts.push(serde_json::json!({
            "inline_data": {
                "mime_type": image.mime_type,
                "data": encoded
            }
        }));
    }

    serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": parts
        }],
        "generationConfig": {
            "temperature": config.temperature,
            "maxOutputTokens": config.max_output_tokens
        }
    })
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
        config: &GenerationConfig,
    ) -> Result<String> {
        info!("Delegating to Gemini for generation");
        debug!("Model: {}, has image: {}", model, request.image.is_some());

        let body = build_request_body(request, config);

        let response = self
            .client
            .post(format!(
                "{}/{}:generateContent",
                self.config.base_url,
                model_path(model)
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let message = extract_error_message(status, &error_text);
            return Err(classify_api_error(model, status, message));
        }

        let response_body: Value = response.json().await?;

        let parts = response_body["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| VerdiError::GatewayError("no candidates in response".to_string()))?;

        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();

        if text.is_empty() {
            return Err(VerdiError::GatewayError("no text in response".to_string()));
        }

        Ok(text)
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        debug!("Fetching Gemini model catalog");

        let response = self
            .client
            .get(format!("{}/models", self.config.base_url))
            .query(&[("pageSize", "200")])
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VerdiError::CatalogUnavailable(extract_error_message(
                status,
                &error_text,
            )));
        }

        let body: Value = response.json().await?;

        // An empty catalog comes back as {} rather than an empty list
        match body.get("models") {
            Some(models) => Ok(serde_json::from_value(models.clone())?),
            None => Ok(vec![]),
        }
    }
}

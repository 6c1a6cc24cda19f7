//! Error types and result alias for Verdi.
//!
//! This module defines the core error type [`VerdiError`] and the [`Result`] alias used
//! throughout the crate. The enum carries the one distinction the call path depends on:
//! whether a failure means the chosen model cannot serve the request (recoverable by the
//! fallback chain) or something else went wrong (terminal for the current call).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerdiError {
    #[error("model {model} cannot serve this request: {message}")]
    ModelUnsupported { model: String, message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("model catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl VerdiError {
    /// Whether this failure should advance the fallback chain.
    ///
    /// True only for the "wrong model for this request" class: a retired alias, an
    /// identifier unknown to the service, or a model that rejects the input modality.
    /// Quota, auth, network, and timeout failures are terminal and must not consult
    /// the chain. This is the single classification point; message-substring matching
    /// is kept only as a last resort for transports that expose no structured status.
    pub fn is_model_unsupported(&self) -> bool {
        match self {
            VerdiError::ModelUnsupported { .. } => true,
            VerdiError::Api { status, message } => {
                *status == 404 || message.contains("404") || message.contains("not found")
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, VerdiError>;

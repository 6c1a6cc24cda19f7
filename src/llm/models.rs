use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Generation method the catalog reports for models that can produce text.
pub const GENERATE_CONTENT: &str = "generateContent";

/// One entry from the remote model catalog.
///
/// The listing is untrusted: the capability field may be missing entirely, in which
/// case the descriptor deserializes with an empty method list and is treated as not
/// generation-capable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(default, rename = "supportedGenerationMethods")]
    pub supported_generation_methods: Vec<String>,
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>, methods: Vec<String>) -> Self {
        Self {
            name: name.into(),
            supported_generation_methods: methods,
            display_name: None,
        }
    }

    /// Whether this model can serve `generateContent` requests.
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods.iter().any(|m| m == GENERATE_CONTENT)
    }
}

/// Opaque image payload attached to a vision request. No decoding happens here;
/// the bytes travel to the API as-is.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Read an image file, inferring the MIME type from the extension.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            // jpg, jpeg, and anything the uploader did not label
            _ => "image/jpeg",
        };
        let data = std::fs::read(path)?;
        Ok(Self::new(mime_type, data))
    }
}

/// One generation call: a prompt and an optional image payload.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<ImageData>,
}

impl GenerationRequest {
    /// Create a text-only request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    /// Attach an image payload to this request
    pub fn with_image(mut self, image: ImageData) -> Self {
        self.image = Some(image);
        self
    }
}

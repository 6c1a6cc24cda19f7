//! Preference and fallback-chain configuration.
//!
//! Which model to prefer and which alternates to try are data, not code: the
//! defaults below reproduce the behavior of the deployed application, and callers
//! can substitute their own orderings without touching the call path.

use crate::llm::models::ModelDescriptor;

/// Ordered substring patterns scanned against the catalog, most preferred first,
/// plus the static identifier used when the catalog is empty or unreachable.
#[derive(Debug, Clone)]
pub struct ModelPreferences {
    pub preferred: Vec<String>,
    pub default_fallback: String,
}

impl Default for ModelPreferences {
    fn default() -> Self {
        Self {
            preferred: vec![
                "gemini-1.5-flash".to_string(),
                "gemini-1.5-pro".to_string(),
                "gemini-1.0-pro".to_string(),
                "gemini-pro".to_string(),
            ],
            default_fallback: "models/gemini-1.5-flash-latest".to_string(),
        }
    }
}

/// Input modality of a generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Vision,
    Text,
}

/// Alternate identifiers tried, in order, when the primary model rejects a request.
///
/// Vision-capable identifiers must precede text-only ones in the vision chain;
/// legacy vision-only models stay out of the text chain.
#[derive(Debug, Clone)]
pub struct CandidateChains {
    pub vision: Vec<String>,
    pub text: Vec<String>,
}

impl Default for CandidateChains {
    fn default() -> Self {
        Self {
            vision: vec![
                "gemini-1.5-flash".to_string(),
                "gemini-1.5-pro".to_string(),
                "gemini-pro-vision".to_string(),
                "gemini-1.5-flash-latest".to_string(),
            ],
            text: vec![
                "gemini-1.5-flash".to_string(),
                "gemini-1.5-pro".to_string(),
                "gemini-pro".to_string(),
                "gemini-1.5-flash-latest".to_string(),
            ],
        }
    }
}

impl CandidateChains {
    pub fn for_modality(&self, modality: Modality) -> &[String] {
        match modality {
            Modality::Vision => &self.vision,
            Modality::Text => &self.text,
        }
    }

    /// Derive chains from the catalog's declared capabilities.
    ///
    /// Generation-capable catalog entries are ranked by preference order and tried
    /// before the static defaults, which are appended only as a last resort. The
    /// catalog does not declare input modality, so the only modality knowledge kept
    /// is that `-vision` suffixed legacy names are excluded from the text chain.
    pub fn from_catalog(catalog: &[ModelDescriptor], preferences: &ModelPreferences) -> Self {
        let ranked = rank_by_preference(catalog, preferences);
        if ranked.is_empty() {
            return Self::default();
        }

        let defaults = Self::default();
        let vision = append_missing(ranked.clone(), &defaults.vision);
        let text = append_missing(
            ranked.into_iter().filter(|name| !name.contains("-vision")).collect(),
            &defaults.text,
        );

        Self { vision, text }
    }
}

// Generation-capable catalog names ordered by preference rank, then catalog order
fn rank_by_preference(catalog: &[ModelDescriptor], preferences: &ModelPreferences) -> Vec<String> {
    let available: Vec<&ModelDescriptor> =
        catalog.iter().filter(|m| m.supports_generation()).collect();

    let mut ranked: Vec<String> = Vec::new();
    for pattern in &preferences.preferred {
        for model in &available {
            if model.name.contains(pattern.as_str()) && !ranked.contains(&model.name) {
                ranked.push(model.name.clone());
            }
        }
    }
    for model in &available {
        if !ranked.contains(&model.name) {
            ranked.push(model.name.clone());
        }
    }
    ranked
}

fn append_missing(mut chain: Vec<String>, defaults: &[String]) -> Vec<String> {
    for name in defaults {
        // catalog names carry the models/ prefix, the defaults may not
        let already_present =
            chain.iter().any(|c| c == name || c.trim_start_matches("models/") == name);
        if !already_present {
            chain.push(name.clone());
        }
    }
    chain
}

use crate::error::Result;
use crate::llm::broker::LlmBroker;
use crate::llm::models::{GenerationRequest, ImageData};
use std::sync::Arc;

/// Instructions for the vision diagnosis call. The structured section headers are
/// what the researcher prompt and the report rendering rely on.
const DIAGNOSIS_PROMPT: &str = "\
You are an expert Agronomist specializing in African crops.
Analyze this image strictly.
1. Identify the crop (e.g., Cassava, Maize, Yam).
2. Identify the specific disease or pest (e.g., Cassava Mosaic Disease, Fall Armyworm, Healthy).
3. Estimate severity (Low, Medium, High).

Output strictly in this format:
**Crop:** [Name]
**Diagnosis:** [Disease Name]
**Severity:** [Level]
**Visual Evidence:** [Brief description of what you see, e.g., yellow mottling, lesions]";

/// Vision diagnosis role: photo in, structured crop/disease report out.
pub struct ScoutAgent {
    broker: Arc<LlmBroker>,
    fallback_chain: Vec<String>,
}

impl ScoutAgent {
    pub fn new(broker: Arc<LlmBroker>, fallback_chain: Vec<String>) -> Self {
        Self {
            broker,
            fallback_chain,
        }
    }

    /// Diagnose a crop photo with the given primary model.
    pub async fn diagnose(&self, model: &str, image: ImageData) -> Result<String> {
        let request = GenerationRequest::text(DIAGNOSIS_PROMPT).with_image(image);
        self.broker.generate_with_fallback(&request, model, &self.fallback_chain).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_prompt_requests_structured_sections() {
        assert!(DIAGNOSIS_PROMPT.contains("**Crop:**"));
        assert!(DIAGNOSIS_PROMPT.contains("**Diagnosis:**"));
        assert!(DIAGNOSIS_PROMPT.contains("**Severity:**"));
        assert!(DIAGNOSIS_PROMPT.contains("**Visual Evidence:**"));
    }
}

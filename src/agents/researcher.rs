use crate::error::Result;
use crate::llm::broker::LlmBroker;
use crate::llm::models::GenerationRequest;
use std::sync::Arc;

// The scout's report is quoted verbatim so the plan addresses exactly what was seen
fn plan_prompt(diagnosis: &str) -> String {
    format!(
        "You are a Senior Agricultural Extension Worker.
Based on this scout report:
'{}'

Provide an Action Plan for a smallholder farmer in Nigeria.
1. **Immediate Action:** What should they do today? (Organic/Chemical options).
2. **Prevention:** How to stop it next season.
3. **Warning:** If severity is High, write a short SMS alert message they can send to neighbors.

Keep it practical and easy to understand.",
        diagnosis
    )
}

/// Treatment planning role: diagnosis text in, action plan out. Text-only call.
pub struct ResearcherAgent {
    broker: Arc<LlmBroker>,
    fallback_chain: Vec<String>,
}

impl ResearcherAgent {
    pub fn new(broker: Arc<LlmBroker>, fallback_chain: Vec<String>) -> Self {
        Self {
            broker,
            fallback_chain,
        }
    }

    /// Produce a treatment plan from a completed diagnosis.
    pub async fn plan(&self, model: &str, diagnosis: &str) -> Result<String> {
        let request = GenerationRequest::text(plan_prompt(diagnosis));
        self.broker.generate_with_fallback(&request, model, &self.fallback_chain).await
    }
}

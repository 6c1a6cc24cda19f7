//! The end-to-end analysis flow: resolve one model, diagnose, then plan treatment.
//!
//! Each report section carries its own outcome. A failure in the treatment call
//! leaves an already-successful diagnosis intact, and a failed diagnosis skips
//! the treatment call entirely since its prompt depends on the diagnosis text.

use crate::agents::{ResearcherAgent, ScoutAgent};
use crate::llm::broker::LlmBroker;
use crate::llm::candidates::{CandidateChains, ModelPreferences};
use crate::llm::gateway::LlmGateway;
use crate::llm::models::ImageData;
use crate::llm::resolver::ModelResolver;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one report section. Terminal failures become plain text attached
/// to the section rather than aborting the interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Report(String),
    Failed(String),
}

impl SectionOutcome {
    pub fn is_report(&self) -> bool {
        matches!(self, SectionOutcome::Report(_))
    }

    /// The section's display text, report or failure alike
    pub fn text(&self) -> &str {
        match self {
            SectionOutcome::Report(text) => text,
            SectionOutcome::Failed(text) => text,
        }
    }
}

/// One completed interaction: the model that served it and both report sections.
#[derive(Debug, Clone)]
pub struct CropAnalysis {
    pub model: String,
    pub diagnosis: SectionOutcome,
    /// None when the diagnosis failed and the treatment call never ran
    pub treatment: Option<SectionOutcome>,
}

/// Wires the resolver, broker, and the two agent roles together.
pub struct AnalysisPipeline {
    resolver: ModelResolver,
    scout: ScoutAgent,
    researcher: ResearcherAgent,
}

impl AnalysisPipeline {
    /// Create a pipeline with the default preferences and fallback chains
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self::with_configuration(
            gateway,
            ModelPreferences::default(),
            CandidateChains::default(),
        )
    }

    pub fn with_configuration(
        gateway: Arc<dyn LlmGateway>,
        preferences: ModelPreferences,
        chains: CandidateChains,
    ) -> Self {
        let broker = Arc::new(LlmBroker::new(Arc::clone(&gateway)));
        Self {
            resolver: ModelResolver::new(gateway, preferences),
            scout: ScoutAgent::new(Arc::clone(&broker), chains.vision),
            researcher: ResearcherAgent::new(broker, chains.text),
        }
    }

    /// Run one full analysis on an uploaded crop photo.
    pub async fn run(&self, image: ImageData) -> CropAnalysis {
        let model = self.resolver.resolve().await.to_string();
        info!(model = %model, "Starting crop analysis");

        let diagnosis_text = match self.scout.diagnose(&model, image).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Diagnosis failed");
                return CropAnalysis {
                    model,
                    diagnosis: SectionOutcome::Failed(e.to_string()),
                    treatment: None,
                };
            }
        };

        let treatment = match self.researcher.plan(&model, &diagnosis_text).await {
            Ok(plan) => SectionOutcome::Report(plan),
            Err(e) => {
                warn!(error = %e, "Treatment planning failed");
                SectionOutcome::Failed(e.to_string())
            }
        };

        CropAnalysis {
            model,
            diagnosis: SectionOutcome::Report(diagnosis_text),
            treatment: Some(treatment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, VerdiError};
    use crate::llm::gateway::GenerationConfig;
    use crate::llm::models::{GenerationRequest, ModelDescriptor, GENERATE_CONTENT};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // Routes by modality: vision requests get the diagnosis script, text requests
    // get the treatment script. Records every prompt for assertions.
    struct RoleGateway {
        diagnosis: std::result::Result<String, u16>,
        treatment: std::result::Result<String, u16>,
        prompts: Mutex<Vec<(bool, String)>>,
    }

    impl RoleGateway {
        fn new(
            diagnosis: std::result::Result<&str, u16>,
            treatment: std::result::Result<&str, u16>,
        ) -> Self {
            Self {
                diagnosis: diagnosis.map(String::from),
                treatment: treatment.map(String::from),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<(bool, String)> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for RoleGateway {
        async fn generate(
            &self,
            _model: &str,
            request: &GenerationRequest,
            _config: &GenerationConfig,
        ) -> Result<String> {
            let is_vision = request.image.is_some();
            self.prompts.lock().unwrap().push((is_vision, request.prompt.clone()));

            let outcome = if is_vision { &self.diagnosis } else { &self.treatment };
            match outcome {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(VerdiError::Api {
                    status: *status,
                    message: "scripted failure".to_string(),
                }),
            }
        }

        async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
            Ok(vec![ModelDescriptor::new(
                "models/gemini-1.5-flash",
                vec![GENERATE_CONTENT.to_string()],
            )])
        }
    }

    fn leaf_image() -> ImageData {
        ImageData::new("image/jpeg", vec![0xff, 0xd8, 0xff])
    }

    #[tokio::test]
    async fn test_full_analysis_success() {
        let gateway = Arc::new(RoleGateway::new(
            Ok("**Crop:** Cassava\n**Diagnosis:** Mosaic Disease"),
            Ok("1. Remove infected plants"),
        ));
        let pipeline = AnalysisPipeline::new(Arc::clone(&gateway) as Arc<dyn LlmGateway>);

        let analysis = pipeline.run(leaf_image()).await;

        assert_eq!(analysis.model, "models/gemini-1.5-flash");
        assert_eq!(
            analysis.diagnosis,
            SectionOutcome::Report("**Crop:** Cassava\n**Diagnosis:** Mosaic Disease".to_string())
        );
        assert_eq!(
            analysis.treatment,
            Some(SectionOutcome::Report("1. Remove infected plants".to_string()))
        );
    }

    #[tokio::test]
    async fn test_treatment_prompt_embeds_diagnosis() {
        let diagnosis = "**Crop:** Maize\n**Diagnosis:** Fall Armyworm\n**Severity:** High";
        let gateway = Arc::new(RoleGateway::new(Ok(diagnosis), Ok("spray today")));
        let pipeline = AnalysisPipeline::new(Arc::clone(&gateway) as Arc<dyn LlmGateway>);

        pipeline.run(leaf_image()).await;

        let prompts = gateway.prompts();
        assert_eq!(prompts.len(), 2);
        let (is_vision, treatment_prompt) = &prompts[1];
        assert!(!is_vision);
        assert!(treatment_prompt.contains(diagnosis));
    }

    #[tokio::test]
    async fn test_treatment_failure_keeps_diagnosis() {
        let gateway = Arc::new(RoleGateway::new(Ok("**Crop:** Yam"), Err(429)));
        let pipeline = AnalysisPipeline::new(Arc::clone(&gateway) as Arc<dyn LlmGateway>);

        let analysis = pipeline.run(leaf_image()).await;

        assert!(analysis.diagnosis.is_report());
        let treatment = analysis.treatment.unwrap();
        assert!(!treatment.is_report());
        assert!(treatment.text().contains("scripted failure"));
    }

    #[tokio::test]
    async fn test_diagnosis_failure_skips_researcher() {
        let gateway = Arc::new(RoleGateway::new(Err(403), Ok("unreachable")));
        let pipeline = AnalysisPipeline::new(Arc::clone(&gateway) as Arc<dyn LlmGateway>);

        let analysis = pipeline.run(leaf_image()).await;

        assert!(!analysis.diagnosis.is_report());
        assert!(analysis.treatment.is_none());
        // only the vision call ever ran
        let prompts = gateway.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].0);
    }

    #[test]
    fn test_section_outcome_text() {
        assert_eq!(SectionOutcome::Report("plan".to_string()).text(), "plan");
        assert_eq!(SectionOutcome::Failed("oops".to_string()).text(), "oops");
    }
}

pub mod agents;
pub mod analysis;
pub mod error;
pub mod llm;

pub use error::{Result, VerdiError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agents::{ResearcherAgent, ScoutAgent};
    pub use crate::analysis::{AnalysisPipeline, CropAnalysis, SectionOutcome};
    pub use crate::error::{Result, VerdiError};
    pub use crate::llm::gateways::GeminiGateway;
    pub use crate::llm::{
        CandidateChains, GenerationConfig, GenerationRequest, ImageData, LlmBroker, LlmGateway,
        Modality, ModelDescriptor, ModelPreferences, ModelResolver,
    };
}

pub mod broker;
pub mod candidates;
pub mod gateway;
pub mod gateways;
pub mod models;
pub mod resolver;

pub use broker::LlmBroker;
pub use candidates::{CandidateChains, Modality, ModelPreferences};
pub use gateway::{GenerationConfig, LlmGateway};
pub use models::{GenerationRequest, ImageData, ModelDescriptor};
pub use resolver::{select_model, ModelResolver};

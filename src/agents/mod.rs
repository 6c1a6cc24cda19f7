//! The two prompt roles of the analysis pipeline.
//!
//! The scout diagnoses a leaf photo (vision call); the researcher turns the
//! diagnosis into a treatment plan (text call). Each role carries its own
//! fallback chain ordered for its modality.

pub mod researcher;
pub mod scout;

pub use researcher::ResearcherAgent;
pub use scout::ScoutAgent;

//! Analysis module - the backend payload models.

mod analysis_model;

// Re-export the public interface
pub use analysis_model::{AnalysisPayload, ModelPayload};

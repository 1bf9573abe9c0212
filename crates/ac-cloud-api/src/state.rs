//! Shared application state for the Axum server.

use std::sync::Arc;

use tokio::sync::RwLock;

use ac_diagnosis::{
    AgronomistAdvisor, DiagnosisPipeline, GeminiConfig, GeminiVision, HeuristicModel,
};
use ac_protocol::DiagnosisRecord;

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
#[derive(Clone)]
pub struct AppState {
    /// Confidence-gated diagnosis pipeline.
    pub pipeline: Arc<DiagnosisPipeline>,
    /// Advisory engine for post-diagnosis recommendations.
    pub advisor: Arc<dyn AgronomistAdvisor>,
    /// In-memory log of completed diagnoses, oldest first.
    pub history: Arc<RwLock<Vec<DiagnosisRecord>>>,
}

impl AppState {
    /// Create state with injected engines (tests swap in mocks here).
    pub fn new(pipeline: DiagnosisPipeline, advisor: Arc<dyn AgronomistAdvisor>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            advisor,
            history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create production state: heuristic local tier, Gemini remote tier.
    pub fn from_env() -> Self {
        let gemini = Arc::new(GeminiVision::new(GeminiConfig::from_env()));
        let pipeline = DiagnosisPipeline::new(
            Box::new(HeuristicModel::new()),
            Box::new(HeuristicModel::new()),
            gemini.clone(),
        );
        Self::new(pipeline, gemini)
    }
}

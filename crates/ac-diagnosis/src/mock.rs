//! Scripted engines for orchestrator and API tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use ac_protocol::{Crop, HeatmapPoint, Severity};

use crate::encoding::EncodedImage;
use crate::error::{DiagnosisError, PipelineResult};
use crate::gemini::{AgronomistAdvisor, RemoteDiagnosis, RemoteDiagnosisEngine};

enum Script {
    Success(RemoteDiagnosis),
    ParseFailure(String),
    TransportFailure(String),
}

/// Remote engine that replays a scripted outcome and counts calls.
pub struct MockRemoteEngine {
    script: Script,
    calls: AtomicUsize,
}

impl MockRemoteEngine {
    pub fn succeeding(diagnosis: RemoteDiagnosis) -> Self {
        Self {
            script: Script::Success(diagnosis),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn parse_failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::ParseFailure(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn transport_failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::TransportFailure(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `diagnose` has been invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A plausible vision-tier diagnosis for scripting.
    pub fn sample_diagnosis() -> RemoteDiagnosis {
        RemoteDiagnosis {
            disease: "Bacterial Leaf Blight".into(),
            damage_type: "Bacterial".into(),
            severity: Severity::High,
            crop_stage: "Tillering".into(),
            description: "Water-soaked lesions along the leaf margins.".into(),
            remedy: "Drain the field and apply a copper-based bactericide.".into(),
            heatmap_center: HeatmapPoint { x: 55.0, y: 45.0 },
        }
    }
}

#[async_trait]
impl RemoteDiagnosisEngine for MockRemoteEngine {
    async fn diagnose(&self, _image: &EncodedImage, _crop: Crop) -> PipelineResult<RemoteDiagnosis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Success(diagnosis) => Ok(diagnosis.clone()),
            Script::ParseFailure(msg) => Err(DiagnosisError::Parse(msg.clone())),
            Script::TransportFailure(msg) => Err(DiagnosisError::Transport(msg.clone())),
        }
    }
}

/// Advisor that returns a fixed recommendation list, or a transport error.
pub struct MockAdvisor {
    outcome: Result<Vec<String>, String>,
}

impl MockAdvisor {
    pub fn with_recommendations(recommendations: Vec<String>) -> Self {
        Self {
            outcome: Ok(recommendations),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

#[async_trait]
impl AgronomistAdvisor for MockAdvisor {
    async fn recommend(
        &self,
        _crop: Crop,
        _damage_type: &str,
        _severity: Severity,
    ) -> PipelineResult<Vec<String>> {
        match &self.outcome {
            Ok(recs) => Ok(recs.clone()),
            Err(msg) => Err(DiagnosisError::Transport(msg.clone())),
        }
    }
}

//! Confidence-gated orchestrator — local-first with vision fallback.
//!
//! Draws one gating confidence per request. At or above the threshold the
//! local candidate is returned and no network traffic happens; below it
//! the photo is encoded and sent to the remote vision engine. Remote
//! failures surface to the caller unchanged.

use std::sync::Arc;

use ac_protocol::{Crop, DiagnosisResult, DiagnosisSource};

use crate::compensation::compensation;
use crate::encoding::EncodedImage;
use crate::error::{DiagnosisError, PipelineResult};
use crate::gemini::RemoteDiagnosisEngine;
use crate::heuristic::{CandidateGenerator, ConfidenceEstimator};

/// Gating scores at or above this go to the local tier.
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Composite engine routing each request to exactly one tier.
pub struct DiagnosisPipeline {
    estimator: Box<dyn ConfidenceEstimator>,
    generator: Box<dyn CandidateGenerator>,
    remote: Arc<dyn RemoteDiagnosisEngine>,
    threshold: f64,
}

impl DiagnosisPipeline {
    pub fn new(
        estimator: Box<dyn ConfidenceEstimator>,
        generator: Box<dyn CandidateGenerator>,
        remote: Arc<dyn RemoteDiagnosisEngine>,
    ) -> Self {
        Self {
            estimator,
            generator,
            remote,
            threshold: CONFIDENCE_THRESHOLD,
        }
    }

    /// Override the gating threshold. 0.0 forces the local tier, anything
    /// above 1.0 forces the remote tier.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Diagnose a leaf photo for the given crop.
    pub async fn diagnose(
        &self,
        image: &[u8],
        mime_type: &str,
        crop: Crop,
    ) -> PipelineResult<DiagnosisResult> {
        if image.is_empty() {
            return Err(DiagnosisError::InputMissing);
        }

        let gating = self.estimator.gating_confidence();
        if gating >= self.threshold {
            tracing::debug!(confidence = gating, crop = crop.label(), "local model confident");
            let candidate = self.generator.candidate(crop);
            return Ok(DiagnosisResult {
                compensation: compensation(crop, candidate.severity, &candidate.disease),
                disease: candidate.disease,
                confidence: Some(candidate.displayed_confidence),
                description: candidate.description,
                remedy: candidate.remedy,
                source: DiagnosisSource::LocalModel,
                damage_type: candidate.damage_type,
                crop_stage: candidate.crop_stage,
                severity: candidate.severity,
                heatmap_center: Some(candidate.heatmap_center),
            });
        }

        tracing::debug!(
            confidence = gating,
            crop = crop.label(),
            "local model uncertain, falling back to vision"
        );
        let encoded = EncodedImage::from_bytes(image, mime_type)?;
        let remote = self.remote.diagnose(&encoded, crop).await?;
        Ok(DiagnosisResult {
            compensation: compensation(crop, remote.severity, &remote.disease),
            disease: remote.disease,
            confidence: None,
            description: remote.description,
            remedy: remote.remedy,
            source: DiagnosisSource::RemoteVision,
            damage_type: remote.damage_type,
            crop_stage: remote.crop_stage,
            severity: remote.severity,
            heatmap_center: Some(remote.heatmap_center),
        })
    }
}

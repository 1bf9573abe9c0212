//! Local heuristic "model" — the zero-cost tier.
//!
//! Stands in for a trained classifier: its confidence and candidate
//! diagnoses are drawn from tuned random distributions. Both capabilities
//! sit behind traits so a real model can replace them without touching
//! the orchestrator.

use ac_protocol::{Crop, HeatmapPoint, Severity};
use rand::Rng;

/// Produces the gating confidence that decides local vs remote.
pub trait ConfidenceEstimator: Send + Sync {
    /// Confidence score in [0.4, 1.0).
    fn gating_confidence(&self) -> f64;
}

/// Produces a candidate diagnosis when the local tier wins the gate.
pub trait CandidateGenerator: Send + Sync {
    fn candidate(&self, crop: Crop) -> LocalDiagnosis;
}

/// A diagnosis produced by the local tier, before compensation and
/// result assembly.
#[derive(Debug, Clone)]
pub struct LocalDiagnosis {
    pub disease: String,
    /// Score shown to the claimant. Not the gating score.
    pub displayed_confidence: f64,
    pub severity: Severity,
    pub description: String,
    pub remedy: String,
    pub damage_type: String,
    pub crop_stage: String,
    pub heatmap_center: HeatmapPoint,
}

/// Diseases the heuristic model claims to recognize, per crop. Crops
/// without their own list borrow the tomato set.
fn known_diseases(crop: Crop) -> &'static [&'static str] {
    const TOMATO: &[&str] = &[
        "Early blight",
        "Late blight",
        "Leaf Mold",
        "Septoria leaf spot",
    ];
    const POTATO: &[&str] = &["Early blight", "Late blight", "Black Scurf", "Common Scab"];
    const CORN: &[&str] = &[
        "Gray leaf spot",
        "Northern corn leaf blight",
        "Common rust",
    ];
    match crop {
        Crop::Tomato => TOMATO,
        Crop::Potato => POTATO,
        Crop::Corn => CORN,
        _ => TOMATO,
    }
}

const SEVERITIES: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

/// The stand-in model. Stateless; every call draws fresh randomness.
pub struct HeuristicModel;

impl HeuristicModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfidenceEstimator for HeuristicModel {
    fn gating_confidence(&self) -> f64 {
        // sqrt skews the distribution toward the high end, so the local
        // tier answers most requests.
        let u: f64 = rand::thread_rng().r#gen();
        0.4 + u.sqrt() * 0.6
    }
}

impl CandidateGenerator for HeuristicModel {
    fn candidate(&self, crop: Crop) -> LocalDiagnosis {
        let mut rng = rand::thread_rng();
        let diseases = known_diseases(crop);
        let disease = diseases[rng.gen_range(0..diseases.len())].to_string();
        let severity = SEVERITIES[rng.gen_range(0..SEVERITIES.len())];

        LocalDiagnosis {
            description: format!(
                "Signs of {} detected. This is a common issue for {} in humid conditions.",
                disease,
                crop.label()
            ),
            disease,
            displayed_confidence: 0.9 + rng.gen_range(0.0..0.099),
            severity,
            remedy: "Apply a suitable fungicide like Mancozeb and ensure proper plant spacing \
                     for better air circulation."
                .to_string(),
            damage_type: "Fungal Disease".to_string(),
            crop_stage: "Vegetative to Fruiting".to_string(),
            heatmap_center: HeatmapPoint {
                x: rng.gen_range(30.0..70.0),
                y: rng.gen_range(30.0..70.0),
            },
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Crop, Severity};

/// Center of the damage region on the uploaded photo, in percent of
/// image width/height (0.0 to 100.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub x: f64,
    pub y: f64,
}

impl HeatmapPoint {
    /// Fallback center when the vision model omits coordinates.
    pub fn image_center() -> HeatmapPoint {
        HeatmapPoint { x: 50.0, y: 50.0 }
    }
}

/// Which inference tier produced a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosisSource {
    /// On-box heuristic model.
    #[serde(rename = "Custom Model")]
    LocalModel,
    /// Gemini vision fallback.
    #[serde(rename = "Gemini Vision")]
    RemoteVision,
}

/// A completed diagnosis as returned to the claim client.
///
/// Field names follow the claim UI's JSON contract (camelCase for the
/// compound fields, `confidence` and `heatmapCenter` absent rather than
/// null when not applicable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// Identified disease, or a "Healthy" verdict.
    pub disease: String,
    /// Displayed confidence score. Only the local tier reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// One-sentence description of the finding.
    pub description: String,
    /// Suggested treatment.
    pub remedy: String,
    /// Estimated payout in INR per hectare.
    pub compensation: f64,
    /// Which tier produced this diagnosis.
    pub source: DiagnosisSource,
    /// Damage classification (e.g. "Fungal Disease").
    #[serde(rename = "damageType")]
    pub damage_type: String,
    /// Growth stage observed in the photo.
    #[serde(rename = "cropStage")]
    pub crop_stage: String,
    /// Assessed damage severity.
    pub severity: Severity,
    /// Damage region center, when the tier localizes damage.
    #[serde(rename = "heatmapCenter", skip_serializing_if = "Option::is_none")]
    pub heatmap_center: Option<HeatmapPoint>,
}

/// A diagnosis result stamped with identity and time, as kept in the
/// service's history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    /// Unique record ID (UUIDv7 for time-sortability).
    pub id: Uuid,
    /// Crop the claimant reported.
    pub crop: Crop,
    /// When the diagnosis completed.
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: DiagnosisResult,
}

impl DiagnosisRecord {
    pub fn new(crop: Crop, result: DiagnosisResult) -> Self {
        Self {
            id: Uuid::now_v7(),
            crop,
            created_at: Utc::now(),
            result,
        }
    }
}

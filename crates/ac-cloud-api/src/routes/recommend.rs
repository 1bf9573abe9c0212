//! Agronomist recommendation endpoint.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use ac_protocol::{Crop, Severity};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for treatment recommendations.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub crop_type: String,
    pub damage_type: String,
    /// Severity label; unrecognized values degrade to Low.
    pub severity: String,
}

/// POST /api/v1/recommend — up to three actionable steps for the farmer.
pub async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> ApiResult<Json<Value>> {
    let crop = Crop::from_label(&req.crop_type).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let severity = Severity::from_label_lenient(&req.severity);

    let recommendations = state
        .advisor
        .recommend(crop, &req.damage_type, severity)
        .await?;

    Ok(Json(json!({
        "recommendations": recommendations,
        "crop_type": crop.label(),
        "damage_type": req.damage_type,
        "severity": severity.label(),
    })))
}

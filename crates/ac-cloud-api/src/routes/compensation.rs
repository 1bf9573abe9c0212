//! Standalone compensation calculation endpoint.

use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use ac_diagnosis::compensation;
use ac_protocol::{Crop, Severity};

use crate::error::{ApiError, ApiResult};

/// Request body for a compensation estimate.
#[derive(Debug, Deserialize)]
pub struct CompensationRequest {
    /// Crop label as on the claim form.
    pub crop_type: String,
    /// Severity label; unrecognized values degrade to Low.
    pub severity: String,
    /// Diagnosed issue; "healthy" verdicts pay nothing.
    pub disease: String,
}

/// POST /api/v1/compensation — payout estimate without a photo.
pub async fn calculate(Json(req): Json<CompensationRequest>) -> ApiResult<Json<Value>> {
    let crop = Crop::from_label(&req.crop_type).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let severity = Severity::from_label_lenient(&req.severity);
    let amount = compensation(crop, severity, &req.disease);

    Ok(Json(json!({
        "compensation": amount,
        "breakdown": {
            "crop_type": crop.label(),
            "severity": severity.label(),
            "sum_insured": crop.sum_insured_per_hectare(),
            "multiplier": severity.multiplier(),
        }
    })))
}

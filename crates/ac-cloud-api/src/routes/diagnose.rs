//! Diagnosis endpoints: photo upload and history listing.

use axum::Json;
use axum::extract::{Multipart, State};

use ac_protocol::{Crop, DiagnosisRecord};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /api/v1/diagnose — multipart upload with `file` and `crop_type`
/// fields. Runs the pipeline and appends the record to the history log.
pub async fn diagnose(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<DiagnosisRecord>> {
    let mut image: Option<(Vec<u8>, String)> = None;
    let mut crop_label: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {e}")))?;
                image = Some((bytes.to_vec(), mime_type));
            }
            Some("crop_type") => {
                let label = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read crop_type: {e}")))?;
                crop_label = Some(label);
            }
            _ => {}
        }
    }

    let (bytes, mime_type) = image.ok_or_else(|| ApiError::BadRequest("no image supplied".into()))?;
    let label = crop_label.ok_or_else(|| ApiError::BadRequest("missing crop_type field".into()))?;
    let crop = Crop::from_label(&label).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let result = state.pipeline.diagnose(&bytes, &mime_type, crop).await?;
    let record = DiagnosisRecord::new(crop, result);

    {
        let mut history = state.history.write().await;
        history.push(record.clone());
    }

    tracing::info!(
        record_id = %record.id,
        crop = crop.label(),
        source = ?record.result.source,
        compensation = record.result.compensation,
        "diagnosis completed"
    );

    Ok(Json(record))
}

/// GET /api/v1/diagnoses — most recent diagnoses, newest first.
pub async fn list_diagnoses(State(state): State<AppState>) -> Json<Vec<DiagnosisRecord>> {
    let history = state.history.read().await;
    let recent: Vec<DiagnosisRecord> = history.iter().rev().take(50).cloned().collect();
    Json(recent)
}

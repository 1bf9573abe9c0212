//! Shared test harness for E2E integration tests.
//!
//! Drives the real router (pipeline, history log, error mapping) through
//! `tower::oneshot`, with the remote tier scripted or pointed at wiremock.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use ac_cloud_api::routes::build_router;
use ac_cloud_api::state::AppState;
use ac_diagnosis::{
    AgronomistAdvisor, DiagnosisPipeline, HeuristicModel, MockAdvisor, MockRemoteEngine,
    RemoteDiagnosisEngine,
};

/// Multipart boundary used by all upload helpers.
const BOUNDARY: &str = "agriclaim-e2e-boundary";

/// End-to-end test harness around the real Axum router.
pub struct TestHarness {
    /// Application state (in-memory history, injected engines).
    pub state: AppState,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
}

impl TestHarness {
    /// Harness whose gate always picks the local tier. The remote engine
    /// is wired to fail so any network attempt shows up as a 502.
    pub fn forced_local() -> Self {
        Self::with_remote(
            Arc::new(MockRemoteEngine::transport_failing("remote tier disabled")),
            0.0,
        )
    }

    /// Harness whose gate always falls through to the given remote engine.
    pub fn forced_remote(remote: Arc<dyn RemoteDiagnosisEngine>) -> Self {
        Self::with_remote(remote, 1.01)
    }

    /// Harness with a custom advisor (forced-local pipeline).
    pub fn with_advisor(advisor: Arc<dyn AgronomistAdvisor>) -> Self {
        let pipeline = DiagnosisPipeline::new(
            Box::new(HeuristicModel::new()),
            Box::new(HeuristicModel::new()),
            Arc::new(MockRemoteEngine::transport_failing("remote tier disabled")),
        )
        .with_threshold(0.0);
        Self::build(AppState::new(pipeline, advisor))
    }

    fn with_remote(remote: Arc<dyn RemoteDiagnosisEngine>, threshold: f64) -> Self {
        let pipeline = DiagnosisPipeline::new(
            Box::new(HeuristicModel::new()),
            Box::new(HeuristicModel::new()),
            remote,
        )
        .with_threshold(threshold);
        let advisor = Arc::new(MockAdvisor::with_recommendations(vec![
            "Monitor the affected plants closely for any changes in symptoms.".into(),
            "Consult with a local agricultural extension office for specific treatment options."
                .into(),
            "Document the damage with photos for insurance or record-keeping purposes.".into(),
        ]));
        Self::build(AppState::new(pipeline, advisor))
    }

    fn build(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Upload a photo via POST /api/v1/diagnose.
    /// Returns (HTTP status code, response JSON body).
    pub async fn diagnose(
        &self,
        image: &[u8],
        mime_type: &str,
        crop_label: &str,
    ) -> (StatusCode, serde_json::Value) {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"leaf.jpg\"\r\nContent-Type: {mime_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(
            format!(
                "\r\n--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"crop_type\"\r\n\r\n{crop_label}\r\n--{BOUNDARY}--\r\n"
            )
            .as_bytes(),
        );
        self.post_multipart(body).await
    }

    /// Upload with the `file` field absent entirely.
    pub async fn diagnose_without_file(&self, crop_label: &str) -> (StatusCode, serde_json::Value) {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; \
             name=\"crop_type\"\r\n\r\n{crop_label}\r\n--{BOUNDARY}--\r\n"
        )
        .into_bytes();
        self.post_multipart(body).await
    }

    /// Upload with the `crop_type` field absent entirely.
    pub async fn diagnose_without_crop(&self, image: &[u8]) -> (StatusCode, serde_json::Value) {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"leaf.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        self.post_multipart(body).await
    }

    async fn post_multipart(&self, body: Vec<u8>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post("/api/v1/diagnose")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        Self::split(response).await
    }

    /// GET /api/v1/diagnoses.
    pub async fn list_diagnoses(&self) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::get("/api/v1/diagnoses")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        Self::split(response).await
    }

    /// POST /api/v1/compensation.
    pub async fn compensation(
        &self,
        crop_label: &str,
        severity: &str,
        disease: &str,
    ) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({
            "crop_type": crop_label,
            "severity": severity,
            "disease": disease,
        });
        self.post_json("/api/v1/compensation", &body).await
    }

    /// POST /api/v1/recommend.
    pub async fn recommend(
        &self,
        crop_label: &str,
        damage_type: &str,
        severity: &str,
    ) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({
            "crop_type": crop_label,
            "damage_type": damage_type,
            "severity": severity,
        });
        self.post_json("/api/v1/recommend", &body).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post(url)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        Self::split(response).await
    }

    async fn split(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }
}

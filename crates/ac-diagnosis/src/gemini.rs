//! Gemini vision client — the cloud fallback tier.
//!
//! Calls the Gemini `generateContent` REST API with the uploaded photo and
//! a structured response schema, so replies come back as machine-readable
//! JSON instead of prose. One attempt per request; failures surface to the
//! caller, who decides whether to resubmit the claim.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use ac_protocol::{Crop, HeatmapPoint, Severity};

use crate::encoding::EncodedImage;
use crate::error::{DiagnosisError, PipelineResult};

/// Shown to the claimant when the model's reply cannot be interpreted.
const PARSE_FAILURE_MESSAGE: &str = "Could not interpret the analysis from the AI.";

/// Configuration for the Gemini REST endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API base URL (overridable so tests can point at a mock server).
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// API key, passed as the `key` query parameter.
    pub api_key: String,
    /// Model to use for vision and text calls.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl GeminiConfig {
    /// Build from `GEMINI_API_KEY` / `GEMINI_API_BASE` / `GEMINI_MODEL` /
    /// `GEMINI_TIMEOUT_SECS`. Only the key is a secret; the rest default.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("GEMINI_API_KEY not set, vision fallback will be rejected upstream");
            String::new()
        });
        Self {
            api_base: std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| default_api_base()),
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| default_model()),
            timeout_secs: std::env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout_secs),
        }
    }
}

/// A diagnosis produced by the vision tier. Carries no confidence score;
/// the remote model does not report one.
#[derive(Debug, Clone)]
pub struct RemoteDiagnosis {
    pub disease: String,
    pub damage_type: String,
    pub severity: Severity,
    pub crop_stage: String,
    pub description: String,
    pub remedy: String,
    pub heatmap_center: HeatmapPoint,
}

/// Remote tier of the diagnosis pipeline.
#[async_trait]
pub trait RemoteDiagnosisEngine: Send + Sync {
    async fn diagnose(&self, image: &EncodedImage, crop: Crop) -> PipelineResult<RemoteDiagnosis>;
}

/// Post-diagnosis advisory: actionable steps for the farmer.
#[async_trait]
pub trait AgronomistAdvisor: Send + Sync {
    async fn recommend(
        &self,
        crop: Crop,
        damage_type: &str,
        severity: Severity,
    ) -> PipelineResult<Vec<String>>;
}

/// Raw model output before defaulting. Every field is optional; the
/// schema asks for all of them but the model is not contractually bound.
#[derive(Deserialize)]
struct RawDiagnosis {
    disease: Option<String>,
    #[serde(rename = "damageType")]
    damage_type: Option<String>,
    severity: Option<String>,
    #[serde(rename = "cropStage")]
    crop_stage: Option<String>,
    description: Option<String>,
    remedy: Option<String>,
    #[serde(rename = "heatmapCenter")]
    heatmap_center: Option<HeatmapPoint>,
}

/// `generateContent` response envelope (only the fields we read).
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Client for the Gemini `generateContent` REST API.
pub struct GeminiVision {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiVision {
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build reqwest client");
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// POST a `generateContent` body and return the first text part of the
    /// first candidate. An empty string means the model said nothing.
    async fn generate(&self, body: serde_json::Value) -> PipelineResult<String> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| DiagnosisError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "gemini returned non-success status");
            return Err(DiagnosisError::Transport(format!(
                "gemini returned HTTP {status}"
            )));
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DiagnosisError::Transport(e.to_string()))?;

        let text = envelope
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .unwrap_or_default();
        Ok(text)
    }

    fn vision_request(&self, image: &EncodedImage, crop: Crop) -> serde_json::Value {
        let instruction = format!(
            "You are an expert agricultural pathologist for Tamil Nadu, India. Analyze this \
             image of a {} plant. Your response MUST be a JSON object. Identify the primary \
             issue (disease, pest, nutrient deficiency, or environmental stress). Also, provide \
             the approximate center of the most affected area as a coordinate object with 'x' \
             and 'y' properties, where each is a number from 0 to 100 representing the \
             percentage from the left and top edges of the image, respectively.",
            crop.label()
        );
        json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": image.mime_type, "data": image.data } },
                    { "text": instruction }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "disease": {
                            "type": "STRING",
                            "description": "The common name of the issue (e.g., 'Early Blight', 'Aphid Infestation', 'Nitrogen Deficiency'). If healthy, say 'Healthy'."
                        },
                        "damageType": {
                            "type": "STRING",
                            "description": "Categorize the source of damage. Choose one: Fungal, Bacterial, Viral, Pest, Nutrient Deficiency, Environmental Stress, Water-related."
                        },
                        "severity": {
                            "type": "STRING",
                            "description": "Estimate the severity of the damage. Choose one: Low, Medium, or High."
                        },
                        "cropStage": {
                            "type": "STRING",
                            "description": "The typical crop stage this issue appears (e.g., 'Seedling', 'Vegetative', 'Flowering', 'Fruiting')."
                        },
                        "description": {
                            "type": "STRING",
                            "description": "A brief, one-sentence description of the findings."
                        },
                        "remedy": {
                            "type": "STRING",
                            "description": "A very concise, two-line (max) suggestion for treatment common in India."
                        },
                        "heatmapCenter": {
                            "type": "OBJECT",
                            "description": "An object with x and y coordinates (0-100) for the center of the damage.",
                            "properties": {
                                "x": { "type": "NUMBER" },
                                "y": { "type": "NUMBER" }
                            },
                            "required": ["x", "y"]
                        }
                    },
                    "required": ["disease", "damageType", "severity", "cropStage", "description", "remedy", "heatmapCenter"]
                }
            }
        })
    }
}

/// Apply the per-field defaults to a parsed model reply.
fn finalize(raw: RawDiagnosis) -> RemoteDiagnosis {
    RemoteDiagnosis {
        disease: raw.disease.unwrap_or_else(|| "Unknown Issue".into()),
        damage_type: raw.damage_type.unwrap_or_else(|| "Not specified".into()),
        severity: raw
            .severity
            .map(|s| Severity::from_label_lenient(&s))
            .unwrap_or(Severity::Medium),
        crop_stage: raw.crop_stage.unwrap_or_else(|| "Not specified".into()),
        description: raw
            .description
            .unwrap_or_else(|| "No description provided.".into()),
        remedy: raw
            .remedy
            .unwrap_or_else(|| "Consult a local agricultural expert.".into()),
        heatmap_center: raw.heatmap_center.unwrap_or_else(HeatmapPoint::image_center),
    }
}

#[async_trait]
impl RemoteDiagnosisEngine for GeminiVision {
    async fn diagnose(&self, image: &EncodedImage, crop: Crop) -> PipelineResult<RemoteDiagnosis> {
        let text = self.generate(self.vision_request(image, crop)).await?;

        let raw: RawDiagnosis = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(error = %e, reply = %text, "gemini reply was not schema JSON");
            DiagnosisError::Parse(PARSE_FAILURE_MESSAGE.into())
        })?;

        Ok(finalize(raw))
    }
}

/// Steps suggested when the advisory reply cannot be used.
fn fallback_recommendations() -> Vec<String> {
    vec![
        "Monitor the affected plants closely for any changes in symptoms.".into(),
        "Consult with a local agricultural extension office for specific treatment options.".into(),
        "Document the damage with photos for insurance or record-keeping purposes.".into(),
    ]
}

/// Split an advisory reply into up to three cleaned recommendation lines.
fn parse_recommendations(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['\u{2022}', '-', '*', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', ' '])
        })
        .filter(|line| line.len() > 10)
        .map(str::to_string)
        .take(3)
        .collect()
}

#[async_trait]
impl AgronomistAdvisor for GeminiVision {
    async fn recommend(
        &self,
        crop: Crop,
        damage_type: &str,
        severity: Severity,
    ) -> PipelineResult<Vec<String>> {
        let prompt = format!(
            "Act as an expert agronomist.\n\
             My '{}' plant has been diagnosed with '{}' at {} severity.\n\n\
             In simple, practical terms for a farmer, what does this mean and what are the top \
             3 actionable steps I should take right now, considering this severity level?\n\n\
             Be concise and use bullet points for the steps. Do not include markdown formatting.",
            crop.label(),
            damage_type,
            severity.label()
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let text = self.generate(body).await?;
        let recommendations = parse_recommendations(&text);
        if recommendations.is_empty() {
            tracing::debug!("advisory reply unusable, serving fallback recommendations");
            return Ok(fallback_recommendations());
        }
        Ok(recommendations)
    }
}

//! Confidence-gated crop diagnosis pipeline.
//!
//! A local heuristic model answers high-confidence requests at zero cost;
//! everything else falls back to the Gemini vision API. The tier that
//! produced the answer is recorded in `DiagnosisResult.source`.

pub mod compensation;
pub mod encoding;
pub mod error;
pub mod gemini;
pub mod heuristic;
pub mod mock;
pub mod pipeline;

pub use compensation::compensation;
pub use encoding::EncodedImage;
pub use error::{DiagnosisError, PipelineResult};
pub use gemini::{AgronomistAdvisor, GeminiConfig, GeminiVision, RemoteDiagnosis, RemoteDiagnosisEngine};
pub use heuristic::{CandidateGenerator, ConfidenceEstimator, HeuristicModel, LocalDiagnosis};
pub use mock::{MockAdvisor, MockRemoteEngine};
pub use pipeline::{DiagnosisPipeline, CONFIDENCE_THRESHOLD};

//! Diagnosis pipeline error types.

use thiserror::Error;

/// Errors that can occur while producing a diagnosis.
#[derive(Debug, Error)]
pub enum DiagnosisError {
    /// No image bytes were supplied. Raised before any computation.
    #[error("no image supplied")]
    InputMissing,

    /// The remote model's reply could not be interpreted. The message is
    /// shown to the caller verbatim.
    #[error("{0}")]
    Parse(String),

    /// Network or service failure talking to the remote model.
    #[error("vision service unavailable: {0}")]
    Transport(String),
}

/// Convenience alias for pipeline results.
pub type PipelineResult<T> = Result<T, DiagnosisError>;

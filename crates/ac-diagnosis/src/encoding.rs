//! Image payload encoding for the vision API.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{DiagnosisError, PipelineResult};

/// An image ready for transport to the vision API: base64 data plus the
/// MIME type the client reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

impl EncodedImage {
    /// Encode raw image bytes. Empty input is rejected up front so the
    /// pipeline never spends a gating draw or a network call on nothing.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> PipelineResult<EncodedImage> {
        if bytes.is_empty() {
            return Err(DiagnosisError::InputMissing);
        }
        Ok(EncodedImage {
            data: BASE64.encode(bytes),
            mime_type: mime_type.to_string(),
        })
    }
}

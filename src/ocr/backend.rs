//! OCR backend trait and shared types.

use std::path::Path;

/// Errors from OCR backends.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR failed: {0}")]
    OcrFailed(String),
    #[error("backend not available: {0}")]
    BackendNotAvailable(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Backend configuration.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Recognition language tag, e.g. "eng".
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }
}

/// Result of recognizing one image.
#[derive(Debug, Clone)]
pub struct OcrOutput {
    /// Recognized text. May be noisy, partial, or reordered; the field
    /// extractor is responsible for making sense of it.
    pub text: String,
    /// Name of the backend that produced the text.
    pub backend: &'static str,
    pub processing_time_ms: u64,
}

/// An OCR engine capable of recognizing text in an image file.
pub trait OcrBackend: std::fmt::Debug + Send + Sync {
    /// Stable backend name for configuration and logging.
    fn name(&self) -> &'static str;

    /// Whether the backend can run on this machine.
    fn is_available(&self) -> bool;

    /// Human-readable availability status, with an installation hint when
    /// the backend is missing.
    fn availability_hint(&self) -> String;

    /// Recognize text in an image file. Blocking; callers in async context
    /// wrap this in `spawn_blocking`.
    fn recognize(&self, image_path: &Path) -> Result<OcrOutput, OcrError>;
}

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Construct a backend by configured name.
pub fn create_backend(name: &str, config: OcrConfig) -> Result<Box<dyn OcrBackend>, OcrError> {
    match name {
        "tesseract" => Ok(Box::new(super::TesseractBackend::with_config(config))),
        other => Err(OcrError::BackendNotAvailable(format!(
            "unknown OCR backend '{other}' (available: tesseract)"
        ))),
    }
}

//! OCR backend abstraction.
//!
//! The scanner consumes recognition as an external capability: an image
//! goes in, best-effort text comes out. Tesseract via the system binary is
//! the shipped backend; [`OcrBackend`] keeps the seam open for others.

mod backend;
mod tesseract;

pub use backend::{check_binary, create_backend, OcrBackend, OcrConfig, OcrError, OcrOutput};
pub use tesseract::TesseractBackend;

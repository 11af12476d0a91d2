//! `check` command: report OCR backend availability.

use console::style;

use crate::config::Settings;
use crate::ocr::{create_backend, OcrConfig};

pub fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    let backend = create_backend(
        &settings.ocr.backend,
        OcrConfig {
            language: settings.ocr.language.clone(),
        },
    )?;

    let marker = if backend.is_available() {
        style("✓").green()
    } else {
        style("✗").red()
    };
    println!("{} {}: {}", marker, backend.name(), backend.availability_hint());

    if !backend.is_available() {
        std::process::exit(1);
    }
    Ok(())
}

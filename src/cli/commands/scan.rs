//! `scan` command: one-shot OCR of a log sheet image.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::ProgressBar;
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::fields::Field;
use crate::ocr::{create_backend, OcrConfig};
use crate::rows::build_rows;
use crate::scan::{ScanEvent, Scanner};

use super::open_store;

pub async fn cmd_scan(
    settings: &Settings,
    image: &Path,
    save: bool,
    json: bool,
    lang: Option<&str>,
    backend_name: Option<&str>,
) -> anyhow::Result<()> {
    anyhow::ensure!(image.exists(), "image not found: {}", image.display());

    let backend_name = backend_name.unwrap_or(&settings.ocr.backend);
    let config = OcrConfig {
        language: lang.unwrap_or(&settings.ocr.language).to_string(),
    };
    let backend = create_backend(backend_name, config)?;
    if !backend.is_available() {
        anyhow::bail!("{}", backend.availability_hint());
    }

    let (tx, mut rx) = mpsc::channel(16);
    let scanner = Scanner::new(Arc::from(backend)).with_events(tx);

    let spinner = if json {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let progress = {
        let spinner = spinner.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let Some(pb) = &spinner {
                    match event {
                        ScanEvent::Started { name, .. } => {
                            pb.set_message(format!("Scanning {name}…"));
                        }
                        ScanEvent::Recognized {
                            chars, elapsed_ms, ..
                        } => {
                            pb.set_message(format!("Recognized {chars} chars in {elapsed_ms} ms"));
                        }
                        ScanEvent::Failed { .. } => {}
                    }
                }
            }
        })
    };

    scanner.select_file(image).await?;
    let result = scanner.scan().await;
    progress.abort();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let fields = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
    } else {
        for field in Field::ALL {
            let value = fields.get(field);
            let rendered = if value.is_empty() {
                style("—").dim().to_string()
            } else {
                value.to_string()
            };
            println!("{:>14}  {}", style(field.label()).dim(), rendered);
        }
    }

    if save {
        let (start, end) = build_rows(&fields);
        let mut store = open_store(settings)?;
        store.append_all(vec![start, end])?;
        if !json {
            println!(
                "\n{} 2 rows saved ({} total)",
                style("✓").green(),
                store.len()
            );
        }
    }

    Ok(())
}

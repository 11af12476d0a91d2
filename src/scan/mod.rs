//! Scan orchestration.
//!
//! Owns the lifecycle of one scan attempt: an image is selected, handed to
//! the OCR backend, and the recognized text is mapped onto form fields.
//!
//! States move `Idle → FileSelected → Scanning → {FormReady | Failed}`.
//! A failed scan keeps the selected image so the operator can retry; a
//! completed one requires selecting a file again before the next scan. At
//! most one scan runs at a time: the `Scanning` state is the guard, and a
//! second request while it holds is rejected rather than queued.
//!
//! There is no cancellation and no timeout here. A stuck OCR run stalls
//! that one attempt; the backend's own semantics govern duration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use crate::extract;
use crate::fields::SheetFields;
use crate::ocr::{OcrBackend, OcrError};

/// State of the current scan attempt.
#[derive(Debug, Clone)]
pub enum ScanState {
    Idle,
    FileSelected {
        path: PathBuf,
        name: String,
    },
    Scanning {
        path: PathBuf,
        name: String,
    },
    FormReady(SheetFields),
    /// The attempt failed; the image is retained for retry.
    Failed {
        path: PathBuf,
        name: String,
        message: String,
    },
}

impl ScanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanState::Idle => "idle",
            ScanState::FileSelected { .. } => "file_selected",
            ScanState::Scanning { .. } => "scanning",
            ScanState::FormReady(_) => "form_ready",
            ScanState::Failed { .. } => "failed",
        }
    }
}

/// Progress notifications for one scan attempt. Optional; droppable
/// without affecting the scan itself.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    Started { attempt: Uuid, name: String },
    Recognized { attempt: Uuid, chars: usize, elapsed_ms: u64 },
    Failed { attempt: Uuid, message: String },
}

/// Scan orchestration errors. All are scoped to the single attempt that
/// raised them; the store and form state stay consistent.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("no image selected")]
    NoImage,
    #[error("a scan is already in progress")]
    ScanInFlight,
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// Coordinates image selection, OCR, and field extraction.
pub struct Scanner {
    backend: Arc<dyn OcrBackend>,
    state: Mutex<ScanState>,
    events: Option<mpsc::Sender<ScanEvent>>,
}

impl Scanner {
    pub fn new(backend: Arc<dyn OcrBackend>) -> Self {
        Self {
            backend,
            state: Mutex::new(ScanState::Idle),
            events: None,
        }
    }

    /// Attach a progress event channel.
    pub fn with_events(mut self, events: mpsc::Sender<ScanEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Current state, cloned.
    pub async fn state(&self) -> ScanState {
        self.state.lock().await.clone()
    }

    /// Record a newly selected image. Allowed from any state except while
    /// a scan is in flight (the running attempt would clobber it).
    pub async fn select_file(&self, path: impl Into<PathBuf>) -> Result<(), ScanError> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut state = self.state.lock().await;
        if matches!(*state, ScanState::Scanning { .. }) {
            return Err(ScanError::ScanInFlight);
        }
        *state = ScanState::FileSelected { path, name };
        Ok(())
    }

    /// Run one scan attempt on the selected image: decode check, OCR,
    /// field extraction. On success the state is `FormReady` and the
    /// extracted fields are returned for the form to pre-fill.
    pub async fn scan(&self) -> Result<SheetFields, ScanError> {
        let attempt = Uuid::new_v4();

        let (path, name) = {
            let mut state = self.state.lock().await;
            let (path, name) = match &*state {
                ScanState::Scanning { .. } => return Err(ScanError::ScanInFlight),
                ScanState::FileSelected { path, name }
                | ScanState::Failed { path, name, .. } => (path.clone(), name.clone()),
                ScanState::Idle | ScanState::FormReady(_) => return Err(ScanError::NoImage),
            };
            *state = ScanState::Scanning {
                path: path.clone(),
                name: name.clone(),
            };
            (path, name)
        };

        tracing::info!(%attempt, image = %name, "starting scan");
        self.emit(ScanEvent::Started {
            attempt,
            name: name.clone(),
        })
        .await;

        if let Err(message) = decode_check(&path).await {
            self.fail(attempt, path, name, &message).await;
            return Err(ScanError::Decode(message));
        }

        let backend = self.backend.clone();
        let ocr_path = path.clone();
        let result = tokio::task::spawn_blocking(move || backend.recognize(&ocr_path))
            .await
            .map_err(|e| OcrError::OcrFailed(format!("OCR task failed: {e}")))
            .and_then(|r| r);

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                let message = err.to_string();
                self.fail(attempt, path, name, &message).await;
                return Err(err.into());
            }
        };

        tracing::debug!(%attempt, chars = output.text.len(), ms = output.processing_time_ms, "recognized");
        self.emit(ScanEvent::Recognized {
            attempt,
            chars: output.text.len(),
            elapsed_ms: output.processing_time_ms,
        })
        .await;

        let fields = extract::extract(&output.text);
        *self.state.lock().await = ScanState::FormReady(fields.clone());
        Ok(fields)
    }

    async fn fail(&self, attempt: Uuid, path: PathBuf, name: String, message: &str) {
        tracing::warn!(%attempt, image = %name, "scan failed: {message}");
        self.emit(ScanEvent::Failed {
            attempt,
            message: message.to_string(),
        })
        .await;
        *self.state.lock().await = ScanState::Failed {
            path,
            name,
            message: message.to_string(),
        };
    }

    async fn emit(&self, event: ScanEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event).await;
        }
    }
}

/// Verify the file decodes as an image before spending time on OCR.
async fn decode_check(path: &Path) -> Result<(), String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || image::open(&path).map(|_| ()))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::ocr::OcrOutput;

    /// Backend returning canned results, failing for the first
    /// `fail_first` calls, optionally sleeping to simulate a slow engine.
    #[derive(Debug)]
    struct StubBackend {
        text: String,
        fail_first: usize,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn returning(text: &str) -> Self {
            Self {
                text: text.to_string(),
                fail_first: 0,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl OcrBackend for StubBackend {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn availability_hint(&self) -> String {
            "stub".to_string()
        }

        fn recognize(&self, _image_path: &Path) -> Result<OcrOutput, OcrError> {
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                return Err(OcrError::OcrFailed("engine crashed".to_string()));
            }
            Ok(OcrOutput {
                text: self.text.clone(),
                backend: "stub",
                processing_time_ms: 1,
            })
        }
    }

    fn write_test_image(dir: &Path) -> PathBuf {
        let path = dir.join("sheet.png");
        image::RgbImage::new(8, 8).save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_scan_without_selection() {
        let scanner = Scanner::new(Arc::new(StubBackend::returning("")));
        assert!(matches!(scanner.scan().await, Err(ScanError::NoImage)));
    }

    #[tokio::test]
    async fn test_scan_populates_fields() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_test_image(dir.path());

        let scanner = Scanner::new(Arc::new(StubBackend::returning(
            "Date 4/23/25\nProduction Line L-3-N\n",
        )));
        scanner.select_file(&image).await.unwrap();
        let fields = scanner.scan().await.unwrap();

        assert_eq!(fields.date, "4/23/25");
        assert_eq!(fields.line, "3N");
        assert!(matches!(scanner.state().await, ScanState::FormReady(_)));
    }

    #[tokio::test]
    async fn test_completed_scan_requires_reselection() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_test_image(dir.path());

        let scanner = Scanner::new(Arc::new(StubBackend::returning("Date 4/23/25\n")));
        scanner.select_file(&image).await.unwrap();
        scanner.scan().await.unwrap();

        assert!(matches!(scanner.scan().await, Err(ScanError::NoImage)));
        scanner.select_file(&image).await.unwrap();
        assert!(scanner.scan().await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_scan_allows_retry_on_same_image() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_test_image(dir.path());

        let scanner = Scanner::new(Arc::new(StubBackend {
            text: "Tube 10482\n".to_string(),
            fail_first: 1,
            delay: None,
            calls: AtomicUsize::new(0),
        }));
        scanner.select_file(&image).await.unwrap();

        let err = scanner.scan().await.unwrap_err();
        assert!(matches!(err, ScanError::Ocr(_)));
        assert!(matches!(scanner.state().await, ScanState::Failed { .. }));

        // Same image, no reselection.
        let fields = scanner.scan().await.unwrap();
        assert_eq!(fields.tube, "10482");
    }

    #[tokio::test]
    async fn test_undecodable_file_fails_scan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, "not an image").unwrap();

        let scanner = Scanner::new(Arc::new(StubBackend::returning("")));
        scanner.select_file(&path).await.unwrap();

        let err = scanner.scan().await.unwrap_err();
        assert!(matches!(err, ScanError::Decode(_)));
        assert!(matches!(scanner.state().await, ScanState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_second_scan_rejected_while_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_test_image(dir.path());

        let scanner = Arc::new(Scanner::new(Arc::new(StubBackend {
            text: "Date 4/23/25\n".to_string(),
            fail_first: 0,
            delay: Some(Duration::from_millis(300)),
            calls: AtomicUsize::new(0),
        })));
        scanner.select_file(&image).await.unwrap();

        let running = {
            let scanner = scanner.clone();
            tokio::spawn(async move { scanner.scan().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(matches!(scanner.scan().await, Err(ScanError::ScanInFlight)));
        assert!(matches!(
            scanner.select_file(&image).await,
            Err(ScanError::ScanInFlight)
        ));

        // The guarded attempt still completes normally.
        let fields = running.await.unwrap().unwrap();
        assert_eq!(fields.date, "4/23/25");
    }

    #[tokio::test]
    async fn test_events_emitted() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_test_image(dir.path());

        let (tx, mut rx) = mpsc::channel(8);
        let scanner =
            Scanner::new(Arc::new(StubBackend::returning("Date 4/23/25\n"))).with_events(tx);
        scanner.select_file(&image).await.unwrap();
        scanner.scan().await.unwrap();

        assert!(matches!(rx.recv().await, Some(ScanEvent::Started { .. })));
        assert!(matches!(
            rx.recv().await,
            Some(ScanEvent::Recognized { .. })
        ));
    }
}

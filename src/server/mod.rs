//! Web server hosting the data-entry UI.
//!
//! Serves a single-page form-and-table interface backed by the scan
//! orchestrator and the entry store. The browser drives the same flow the
//! CLI does: select an image, scan, review the pre-filled form, save,
//! export. The table is rebuilt in full from `/api/entries` after every
//! save; no incremental updates.

mod assets;
mod handlers;
mod routes;
mod templates;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Settings;
use crate::ocr::{create_backend, OcrBackend, OcrConfig};
use crate::scan::Scanner;
use crate::store::{EntryStore, FileStorage};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<EntryStore>>,
    pub scanner: Arc<Scanner>,
    pub backend: Arc<dyn OcrBackend>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let backend: Arc<dyn OcrBackend> = create_backend(
            &settings.ocr.backend,
            OcrConfig {
                language: settings.ocr.language.clone(),
            },
        )?
        .into();

        let storage = FileStorage::new(settings.data_dir());
        let store = EntryStore::open(Box::new(storage))?;

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            scanner: Arc::new(Scanner::new(backend.clone())),
            backend,
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = bind.parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! JSON API endpoints: scan, entries, export, status.

use std::io::Write;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;
use crate::export::{self, ExportError, EXPORT_FILENAME};
use crate::fields::SheetFields;
use crate::rows::{build_rows, EntryRow};
use crate::scan::ScanError;

fn error_response(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
        .into_response()
}

/// Scan an uploaded image and return the extracted fields.
///
/// The body is the raw image bytes; content is sniffed and must be an
/// image type before the scan starts.
pub async fn api_scan(State(state): State<AppState>, body: Bytes) -> Response {
    if body.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "empty upload");
    }

    let kind = match infer::get(&body) {
        Some(kind) if kind.mime_type().starts_with("image/") => kind,
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "unsupported upload: expected an image file",
            );
        }
    };

    // The OCR backend works on files; stage the upload in a temp file that
    // lives until the scan finishes.
    let temp = tempfile::Builder::new()
        .prefix("sheetscan-upload-")
        .suffix(&format!(".{}", kind.extension()))
        .tempfile();
    let mut temp = match temp {
        Ok(temp) => temp,
        Err(err) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, err),
    };
    if let Err(err) = temp.write_all(&body) {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, err);
    }

    if let Err(err) = state.scanner.select_file(temp.path()).await {
        return scan_error_response(err);
    }
    match state.scanner.scan().await {
        Ok(fields) => Json(fields).into_response(),
        Err(err) => scan_error_response(err),
    }
}

fn scan_error_response(err: ScanError) -> Response {
    let status = match err {
        ScanError::ScanInFlight => StatusCode::CONFLICT,
        ScanError::NoImage | ScanError::Decode(_) => StatusCode::BAD_REQUEST,
        ScanError::Ocr(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err)
}

/// Full table contents for a rebuild: fixed column list plus all rows.
pub async fn api_entries(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    Json(serde_json::json!({
        "columns": &EntryRow::COLUMNS[..],
        "rows": store.all(),
    }))
}

/// Save confirmed form values: derive the Start/End row pair, append both,
/// persist. Nothing is retained if the persist fails.
pub async fn api_save(
    State(state): State<AppState>,
    Json(form): Json<SheetFields>,
) -> Response {
    let (start, end) = build_rows(&form);

    let mut store = state.store.lock().await;
    if let Err(err) = store.append_all(vec![start, end]) {
        tracing::error!("failed to persist entries: {err}");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, err);
    }

    Json(serde_json::json!({ "saved": 2, "total": store.len() })).into_response()
}

/// Download the saved entries as CSV.
pub async fn api_export(State(state): State<AppState>) -> Response {
    let store = state.store.lock().await;
    match export::to_csv_string(store.all()) {
        Ok(csv) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/csv")
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            )
            .body(Body::from(csv))
            .unwrap()
            .into_response(),
        Err(err @ ExportError::NoEntries) => error_response(StatusCode::BAD_REQUEST, err),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}

/// Store and scanner status.
pub async fn api_status(State(state): State<AppState>) -> impl IntoResponse {
    let entries = state.store.lock().await.len();
    let scan_state = state.scanner.state().await;
    Json(serde_json::json!({
        "entries": entries,
        "backend": state.backend.name(),
        "backend_available": state.backend.is_available(),
        "scan_state": scan_state.as_str(),
    }))
}

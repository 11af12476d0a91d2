//! HTML page handlers.

use axum::{extract::State, response::Html};

use super::super::templates;
use super::super::AppState;

/// The data-entry page: capture controls, the editable field form, and the
/// saved-entries table.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(templates::index_page(store.all()))
}

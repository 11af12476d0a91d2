//! Request handlers.

mod api;
mod pages;
mod static_files;

pub use api::{api_entries, api_export, api_save, api_scan, api_status};
pub use pages::index;
pub use static_files::{serve_css, serve_js};

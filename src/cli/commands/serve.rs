//! `serve` command: run the web interface.

use crate::config::Settings;
use crate::server;

pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    server::serve(settings, bind).await
}

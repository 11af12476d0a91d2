//! `export` command: write saved entries to a CSV file.

use std::path::{Path, PathBuf};

use console::style;

use crate::config::Settings;
use crate::export::{write_csv, ExportError};

use super::open_store;

pub fn cmd_export(settings: &Settings, output: Option<&Path>) -> anyhow::Result<()> {
    let store = open_store(settings)?;

    let path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!(
            "entries-{}.csv",
            chrono::Local::now().format("%Y-%m-%d")
        )),
    };

    let mut out = Vec::new();
    match write_csv(store.all(), &mut out) {
        Ok(()) => {}
        Err(ExportError::NoEntries) => {
            anyhow::bail!("no entries to export: scan and save a sheet first")
        }
        Err(err) => return Err(err.into()),
    }
    std::fs::write(&path, out)?;

    println!(
        "{} exported {} rows to {}",
        style("✓").green(),
        store.len(),
        path.display()
    );
    Ok(())
}

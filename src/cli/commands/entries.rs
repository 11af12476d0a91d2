//! `entries` command: list saved entries.

use console::style;

use crate::config::Settings;
use crate::rows::EntryRow;

use super::open_store;

/// Columns shown in the terminal listing. The full 34-column record is
/// available via `--json` or `export`.
const SUMMARY_COLUMNS: [&str; 8] = [
    "Date", "Tube #", "Line", "S1", "S2", "S3", "Avg", "Comments",
];

pub fn cmd_entries(settings: &Settings, json: bool, limit: usize) -> anyhow::Result<()> {
    let store = open_store(settings)?;
    let rows = store.all();
    let shown: &[EntryRow] = if limit > 0 && rows.len() > limit {
        &rows[rows.len() - limit..]
    } else {
        rows
    };

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No entries saved yet.");
        return Ok(());
    }

    let header: Vec<String> = SUMMARY_COLUMNS
        .iter()
        .map(|c| style(c).bold().to_string())
        .collect();
    println!("{}", header.join("\t"));
    for row in shown {
        let record: Vec<&str> = SUMMARY_COLUMNS.iter().map(|c| row.get(c)).collect();
        println!("{}", record.join("\t"));
    }

    if shown.len() < rows.len() {
        println!(
            "{}",
            style(format!(
                "(showing last {} of {} entries)",
                shown.len(),
                rows.len()
            ))
            .dim()
        );
    }

    Ok(())
}

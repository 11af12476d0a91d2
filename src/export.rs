//! Spreadsheet export.
//!
//! Serializes the saved entry sequence as CSV: the fixed 34-column header
//! followed by one record per row in store order. Exporting an empty store
//! is a user-facing error, never a silent empty file.

use std::io::Write;

use crate::rows::EntryRow;

/// Export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no entries to export")]
    NoEntries,
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Default name for a downloaded export file.
pub const EXPORT_FILENAME: &str = "entries.csv";

/// Write the rows as CSV to `out`. The column order is
/// [`EntryRow::COLUMNS`]; values containing commas, quotes, or newlines
/// are quoted per RFC 4180.
pub fn write_csv(rows: &[EntryRow], out: &mut impl Write) -> Result<(), ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NoEntries);
    }

    let header: Vec<String> = EntryRow::COLUMNS.iter().map(|c| escape_csv(c)).collect();
    writeln!(out, "{}", header.join(","))?;

    for row in rows {
        let record: Vec<String> = EntryRow::COLUMNS
            .iter()
            .map(|column| escape_csv(row.get(column)))
            .collect();
        writeln!(out, "{}", record.join(","))?;
    }

    Ok(())
}

/// Render the rows as an in-memory CSV document.
pub fn to_csv_string(rows: &[EntryRow]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    // write_csv only emits UTF-8.
    Ok(String::from_utf8(buf).unwrap_or_default())
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

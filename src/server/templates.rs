//! HTML templates for the data-entry page.

use crate::fields::Field;
use crate::rows::EntryRow;
use crate::utils::html_escape;

/// Base HTML shell.
pub fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - SheetScan</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header id="main-header">
        <nav>
            <a href="/" class="logo">SheetScan</a>
        </nav>
    </header>
    <main>
        <h1>{}</h1>
        {}
    </main>
    <script src="/static/app.js"></script>
</body>
</html>"#,
        title, title, content
    )
}

/// Render the data-entry page: capture controls, the field form, and the
/// saved-entries table.
pub fn index_page(entries: &[EntryRow]) -> String {
    let content = format!(
        r#"<section id="capture">
            <button type="button" id="camera-btn">Take Photo</button>
            <button type="button" id="choose-file-btn">Choose File</button>
            <input type="file" id="camera-input" accept="image/*" capture="environment" hidden>
            <input type="file" id="file-input" accept="image/*" hidden>
            <span id="file-name-preview" hidden></span>
            <button type="button" id="scan-btn" hidden>Scan</button>
            <span id="scan-status" hidden></span>
        </section>
        <form id="data-form" hidden>
            {}
            <button type="button" id="save-btn">Save Entry</button>
        </form>
        <section id="entries">
            <h2>Saved Entries</h2>
            {}
            <button type="button" id="export-btn">Export CSV</button>
        </section>"#,
        render_form_fields(),
        render_table(entries),
    );
    base_template("Production Log", &content)
}

fn render_form_fields() -> String {
    let mut html = String::new();
    for field in Field::ALL {
        let key = field.key();
        let label = field.label();
        if field.is_flag() {
            html.push_str(&format!(
                r#"<div class="field flag"><label for="{key}">{label}</label><input type="checkbox" id="{key}" name="{key}" value="1"></div>
"#
            ));
        } else {
            html.push_str(&format!(
                r#"<div class="field"><label for="{key}">{label}</label><input type="text" id="{key}" name="{key}"></div>
"#
            ));
        }
    }
    html
}

/// The full entries table. The page rebuilds this client-side after each
/// save from the same data, so both renderings must agree on columns.
fn render_table(entries: &[EntryRow]) -> String {
    let mut html = String::from("<table id=\"entries-table\"><thead><tr>");
    for column in EntryRow::COLUMNS {
        html.push_str(&format!("<th>{}</th>", html_escape(column)));
    }
    html.push_str("</tr></thead><tbody>");
    for row in entries {
        html.push_str("<tr>");
        for column in EntryRow::COLUMNS {
            html.push_str(&format!("<td>{}</td>", html_escape(row.get(column))));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_has_form_input_per_field() {
        let html = index_page(&[]);
        for field in Field::ALL {
            assert!(
                html.contains(&format!("id=\"{}\"", field.key())),
                "missing input for {}",
                field.key()
            );
        }
    }

    #[test]
    fn test_flags_render_as_checkboxes() {
        let html = render_form_fields();
        assert!(html.contains(r#"<input type="checkbox" id="stdChill""#));
        assert!(html.contains(r#"<input type="text" id="date""#));
    }

    #[test]
    fn test_table_escapes_values() {
        let row = EntryRow {
            comments: "Start - <script>".to_string(),
            ..EntryRow::default()
        };
        let html = render_table(&[row]);
        assert!(html.contains("Start - &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_table_has_all_columns() {
        let html = render_table(&[]);
        for column in EntryRow::COLUMNS {
            assert!(html.contains(&html_escape(column)), "{column}");
        }
    }
}

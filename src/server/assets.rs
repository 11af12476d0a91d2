//! Embedded static assets for the web UI.

/// Stylesheet.
pub const CSS: &str = r#"
:root {
    --fg: #1d2129;
    --muted: #6b7280;
    --accent: #2257bf;
    --border: #d4d8dd;
}

* { box-sizing: border-box; }

body {
    margin: 0;
    color: var(--fg);
    font-family: system-ui, sans-serif;
    background: #f6f7f8;
}

#main-header {
    background: #fff;
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
}

#main-header .logo {
    font-weight: 700;
    color: var(--accent);
    text-decoration: none;
}

main {
    max-width: 72rem;
    margin: 0 auto;
    padding: 1rem;
}

#capture {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    flex-wrap: wrap;
    margin-bottom: 1rem;
}

#file-name-preview { color: var(--muted); }
#scan-status { color: var(--muted); }

button {
    padding: 0.45rem 0.9rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: #fff;
    cursor: pointer;
}

button:disabled { opacity: 0.5; cursor: default; }

#scan-btn, #save-btn { background: var(--accent); color: #fff; border-color: var(--accent); }

#data-form {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(13rem, 1fr));
    gap: 0.5rem 1rem;
    background: #fff;
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 1rem;
    margin-bottom: 1.5rem;
}

.field { display: flex; flex-direction: column; }
.field.flag { flex-direction: row; align-items: center; gap: 0.4rem; }
.field label { font-size: 0.8rem; color: var(--muted); }
.field input[type="text"] {
    padding: 0.3rem 0.4rem;
    border: 1px solid var(--border);
    border-radius: 4px;
}

#entries { overflow-x: auto; }

#entries-table {
    border-collapse: collapse;
    font-size: 0.8rem;
    background: #fff;
    margin-bottom: 0.75rem;
    white-space: nowrap;
}

#entries-table th, #entries-table td {
    border: 1px solid var(--border);
    padding: 0.25rem 0.5rem;
    text-align: left;
}

#entries-table th { background: #eef1f4; }
"#;

/// Client-side behavior: file selection, scan, form population, save, and
/// export. Mirrors the server-side scan state machine: selecting a file
/// enables the scan action, a completed scan hides it until the next
/// selection, a failed scan re-enables it for retry.
pub const JS: &str = r#"
(() => {
  const cameraBtn = document.getElementById('camera-btn');
  const chooseFileBtn = document.getElementById('choose-file-btn');
  const cameraInput = document.getElementById('camera-input');
  const fileInput = document.getElementById('file-input');
  const scanBtn = document.getElementById('scan-btn');
  const scanStatus = document.getElementById('scan-status');
  const fileNamePreview = document.getElementById('file-name-preview');
  const dataForm = document.getElementById('data-form');
  const saveBtn = document.getElementById('save-btn');
  const exportBtn = document.getElementById('export-btn');

  let selectedFile = null;

  cameraBtn.addEventListener('click', () => cameraInput.click());
  chooseFileBtn.addEventListener('click', () => fileInput.click());

  function handleFile(file) {
    selectedFile = file;
    fileNamePreview.textContent = file.name;
    fileNamePreview.hidden = false;
    scanBtn.hidden = false;
    scanBtn.disabled = false;
    scanStatus.hidden = true;
  }

  cameraInput.addEventListener('change', e => {
    if (e.target.files[0]) handleFile(e.target.files[0]);
  });
  fileInput.addEventListener('change', e => {
    if (e.target.files[0]) handleFile(e.target.files[0]);
  });

  function setStatus(text) {
    scanStatus.textContent = text;
    scanStatus.hidden = !text;
  }

  function populateForm(fields) {
    for (const [key, value] of Object.entries(fields)) {
      const input = document.getElementById(key);
      if (!input) continue;
      if (input.type === 'checkbox') {
        input.checked = value === '1';
      } else {
        input.value = value;
      }
    }
  }

  scanBtn.addEventListener('click', async () => {
    if (!selectedFile) return;
    scanBtn.disabled = true;
    setStatus('Scanning…');
    try {
      const response = await fetch('/api/scan', {
        method: 'POST',
        headers: { 'Content-Type': selectedFile.type || 'application/octet-stream' },
        body: selectedFile,
      });
      const data = await response.json();
      if (!response.ok) throw new Error(data.error || 'scan failed');
      populateForm(data);
      dataForm.hidden = false;
      // A completed scan is not re-triggerable; re-select to scan again.
      scanBtn.hidden = true;
      setStatus('');
    } catch (err) {
      setStatus('Scan failed: ' + err.message);
      scanBtn.disabled = false;
    }
  });

  function collectForm() {
    const fields = {};
    for (const input of dataForm.querySelectorAll('input')) {
      if (input.type === 'checkbox') {
        fields[input.name] = input.checked ? '1' : '';
      } else {
        fields[input.name] = input.value;
      }
    }
    return fields;
  }

  async function refreshTable() {
    const response = await fetch('/api/entries');
    const data = await response.json();
    const table = document.getElementById('entries-table');
    const head = '<thead><tr>' + data.columns.map(c => '<th>' + escapeHtml(c) + '</th>').join('') + '</tr></thead>';
    const body = '<tbody>' + data.rows.map(row =>
      '<tr>' + data.columns.map(c => '<td>' + escapeHtml(String(row[c] ?? '')) + '</td>').join('') + '</tr>'
    ).join('') + '</tbody>';
    table.innerHTML = head + body;
  }

  function escapeHtml(s) {
    return s.replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;').replace(/"/g, '&quot;');
  }

  saveBtn.addEventListener('click', async () => {
    saveBtn.disabled = true;
    try {
      const response = await fetch('/api/entries', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(collectForm()),
      });
      const data = await response.json();
      if (!response.ok) throw new Error(data.error || 'save failed');
      await refreshTable();
    } catch (err) {
      alert('Save failed: ' + err.message);
    } finally {
      saveBtn.disabled = false;
    }
  });

  exportBtn.addEventListener('click', async () => {
    const response = await fetch('/api/export');
    if (!response.ok) {
      const data = await response.json().catch(() => ({}));
      alert(data.error || 'export failed');
      return;
    }
    const blob = await response.blob();
    const url = URL.createObjectURL(blob);
    const a = document.createElement('a');
    a.href = url;
    a.download = 'entries.csv';
    a.click();
    URL.revokeObjectURL(url);
  });
})();
"#;

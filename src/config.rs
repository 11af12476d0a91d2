//! Configuration management.
//!
//! Settings come from a TOML file, discovered in order: an explicit
//! `--config` path, `./sheetscan.toml`, then the platform config directory
//! (`~/.config/sheetscan/config.toml` on Linux). Missing file means
//! defaults. CLI flags override file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default bind address for the web server.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where entries are persisted. Defaults to the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub ocr: OcrSettings,
    pub server: ServerSettings,
}

/// OCR engine selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Backend name. Only "tesseract" ships today.
    pub backend: String,
    /// Recognition language tag passed to the backend.
    pub language: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            backend: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

/// Web server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Load settings with optional explicit config path and data dir
    /// override from the CLI.
    pub fn load(
        config_path: Option<&Path>,
        data_dir_override: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let mut settings = match discover_config(config_path) {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                let raw = std::fs::read_to_string(&path)?;
                toml::from_str(&raw)?
            }
            None => Settings::default(),
        };

        if data_dir_override.is_some() {
            settings.data_dir = data_dir_override;
        }
        Ok(settings)
    }

    /// Write the current settings as a commented starter config file.
    pub fn write_default(path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let rendered = toml::to_string_pretty(&Settings::default())?;
        std::fs::write(path, rendered)?;
        Ok(())
    }

    /// Default location for a newly initialized config file.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheetscan")
            .join("config.toml")
    }
}

fn discover_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from("sheetscan.toml");
    if local.exists() {
        return Some(local);
    }
    let platform = Settings::default_config_path();
    if platform.exists() {
        return Some(platform);
    }
    None
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("sheetscan")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ocr.backend, "tesseract");
        assert_eq!(settings.ocr.language, "eng");
        assert_eq!(settings.server.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/sheets\"\n\n[ocr]\nlanguage = \"deu\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path), None).unwrap();
        assert_eq!(settings.data_dir(), PathBuf::from("/tmp/sheets"));
        assert_eq!(settings.ocr.language, "deu");
        // Unspecified sections keep their defaults.
        assert_eq!(settings.ocr.backend, "tesseract");
        assert_eq!(settings.server.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_cli_data_dir_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/tmp/a\"\n").unwrap();

        let settings = Settings::load(Some(&path), Some(PathBuf::from("/tmp/b"))).unwrap();
        assert_eq!(settings.data_dir(), PathBuf::from("/tmp/b"));
    }

    #[test]
    fn test_write_default_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Settings::write_default(&path).unwrap();

        let settings = Settings::load(Some(&path), None).unwrap();
        assert_eq!(settings.ocr.backend, "tesseract");
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};

/// Config filename looked up in the working directory.
const CONFIG_FILE: &str = "docsift.toml";

/// User-configurable settings loaded from docsift.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP shell configuration.
    pub server: ServerSettings,
    /// Cleaning pass configuration.
    pub clean: CleanSettings,
}

/// HTTP shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Port to listen on.
    pub port: u16,
    /// Directory for temporary upload storage.
    pub upload_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            upload_dir: PathBuf::from("temp_uploads"),
        }
    }
}

/// Cleaning heuristics. The noise phrases are a content policy, not a
/// structural rule, so they are overridable rather than hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanSettings {
    /// Case-insensitive phrases whose presence discards a whole line
    /// (headers, footers, legal boilerplate).
    pub noise_phrases: Vec<String>,
    /// Minimum length of an all-caps line treated as a title.
    pub title_min_len: usize,
    /// Maximum length of an all-caps line treated as a title.
    pub title_max_len: usize,
    /// Lines with this many words or more are never titles.
    pub title_max_words: usize,
}

impl Default for CleanSettings {
    fn default() -> Self {
        Self {
            noise_phrases: vec![
                "copyright".into(),
                "todos los derechos reservados".into(),
                "aviso legal".into(),
                "política de privacidad".into(),
                "agencia de traducción".into(),
                "traducciones profesionales".into(),
                "ibidem group".into(),
                "contacto".into(),
                "icono cabecera".into(),
            ],
            title_min_len: 5,
            title_max_len: 50,
            title_max_words: 10,
        }
    }
}

impl Settings {
    /// Load settings from docsift.toml in the given directory, falling back
    /// to defaults when the file is absent or unparseable.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        Self::try_load(&dir.join(CONFIG_FILE)).unwrap_or_default()
    }

    fn try_load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(path).ok()?;
        toml::from_str(&content).ok()
    }

    /// Save current settings to docsift.toml in the given directory.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SiftError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(dir.join(CONFIG_FILE), content)?;
        Ok(())
    }
}

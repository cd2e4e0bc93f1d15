//! Local settings file loading.
//!
//! The client takes a language code at construction; when the caller
//! omits it, the language is read from a `setting.json` file next to
//! the process working directory.

use std::path::Path;

use serde::Deserialize;

/// Default settings file name, relative to the working directory.
pub const SETTINGS_FILE: &str = "setting.json";

/// Contents of the local settings file.
///
/// Only the fields this workspace consumes are modeled; unknown fields
/// are ignored so the file can be shared with other tools.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Language code selecting which localized sub-field to read from
    /// manifest records, e.g. `"en"`.
    pub language: String,
}

/// Errors from loading the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON or lacks required fields.
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl Settings {
    /// Load settings from `setting.json` in the working directory.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_language_field() {
        let settings: Settings =
            serde_json::from_str(r#"{"language": "en", "theme": "dark"}"#).unwrap();
        assert_eq!(settings.language, "en");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Settings::load_from("definitely/not/a/real/path.json").unwrap_err();
        assert_matches!(err, SettingsError::Io { .. });
    }
}

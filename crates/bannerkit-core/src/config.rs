//! Editor configuration.

use crate::commands::DEFAULT_HISTORY_CAPACITY;
use crate::export::ExportOptions;
use crate::factory::DEFAULT_DUPLICATE_OFFSET;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Placeholder text for new, untouched text elements.
pub const DEFAULT_PLACEHOLDER_TEXT: &str = "Your text here";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Editor session settings. Every field has a default, so partial files are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undoable commands.
    pub history_capacity: usize,
    /// Text of the initial element; also marks text as not user-authored.
    pub placeholder_text: String,
    /// Size selected when a session starts.
    pub default_size_id: String,
    /// Background selected when a session starts.
    pub default_background_id: String,
    /// Offset applied to duplicated elements, in pixels.
    pub duplicate_offset: f64,
    /// Default export settings.
    pub export: ExportOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            placeholder_text: DEFAULT_PLACEHOLDER_TEXT.to_string(),
            default_size_id: "twitter-header".to_string(),
            default_background_id: "gradient-blue".to_string(),
            duplicate_offset: DEFAULT_DUPLICATE_OFFSET,
            export: ExportOptions::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.placeholder_text, "Your text here");
        assert_eq!(config.duplicate_offset, 20.0);
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{"historyCapacity": 5, "export": {"format": "jpg", "quality": 0.8}}"#)
            .unwrap();
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.export.format, ExportFormat::Jpg);
        assert_eq!(config.default_size_id, "twitter-header");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"placeholderText": "Type here"}}"#).unwrap();
        let config = EditorConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.placeholder_text, "Type here");
    }

    #[test]
    fn test_missing_file() {
        let err = EditorConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

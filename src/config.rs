//! Widget configuration
//!
//! Describes one multi-select control: which sub-widgets it has, its
//! options and its initial state. Loaded from TOML and merged with CLI
//! arguments by the binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One option in the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Text shown in the menu and in the anchor
    pub text: String,

    /// Value reported for the item; defaults to the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ItemConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: None,
        }
    }

    pub fn with_value(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: Some(value.into()),
        }
    }

    /// Effective value of the item
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.text)
    }
}

/// Leading icon settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadingIconConfig {
    pub content: String,
    #[serde(default)]
    pub aria_label: Option<String>,
}

/// Helper text settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperTextConfig {
    /// Element id, referenced from `aria-controls` and `aria-describedby`
    pub id: String,
    pub content: String,
    /// Always shown, not only while invalid
    #[serde(default)]
    pub persistent: bool,
    /// Shown as an error message while the control is invalid
    #[serde(default)]
    pub validation_msg: bool,
}

/// Configuration for one multi-select control
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Id of the anchor element; the control cannot be built without it
    pub anchor_id: Option<String>,

    /// Floating label text; no label when absent
    pub label: Option<String>,

    /// Notched outline instead of a filled anchor with line ripple
    pub outlined: bool,

    pub required: bool,

    pub disabled: bool,

    /// Validity follows the required rule unless set externally
    pub use_default_validation: bool,

    /// Values selected at startup
    pub initial_value: Vec<String>,

    pub leading_icon: Option<LeadingIconConfig>,

    pub helper_text: Option<HelperTextConfig>,

    pub items: Vec<ItemConfig>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            anchor_id: Some("multi-select-anchor".into()),
            label: None,
            outlined: false,
            required: false,
            disabled: false,
            use_default_validation: true,
            initial_value: Vec::new(),
            leading_icon: None,
            helper_text: None,
            items: Vec::new(),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: WidgetConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Multi-select widget configuration
# This file uses TOML format (https://toml.io)

# Id of the anchor element (required)
anchor_id = "fruit-select"

# Floating label; remove the line for a control without label
label = "Fruits"

# Notched outline instead of the filled style with a bottom line
outlined = true

# A required control is invalid while nothing with a value is selected
required = true
disabled = false

# Set to false when validity is managed from outside
use_default_validation = true

# Values selected at startup
initial_value = ["apple"]

[leading_icon]
content = "*"
aria_label = "Favorite fruits"

[helper_text]
id = "fruit-helper"
content = "Pick at least one fruit"
persistent = false
validation_msg = true

# Menu options; value defaults to the text
[[items]]
text = "None"
value = ""

[[items]]
text = "Apple"
value = "apple"

[[items]]
text = "Banana"
value = "banana"

[[items]]
text = "Blueberry"
value = "blueberry"

[[items]]
text = "Cherry"
value = "cherry"
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file '{}': {source}", .path.display())]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {source}")]
    SerializeError { source: toml::ser::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sample_config_parses() {
        let config: WidgetConfig = toml::from_str(&WidgetConfig::sample_config()).unwrap();
        assert_eq!(config.anchor_id.as_deref(), Some("fruit-select"));
        assert_eq!(config.label.as_deref(), Some("Fruits"));
        assert!(config.outlined);
        assert!(config.required);
        assert_eq!(config.items.len(), 5);
        assert_eq!(config.items[0].value(), "");
        assert_eq!(config.items[2].value(), "banana");
        assert_eq!(config.initial_value, vec!["apple".to_string()]);
        let helper = config.helper_text.unwrap();
        assert!(helper.validation_msg);
        assert!(!helper.persistent);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let config: WidgetConfig = toml::from_str("[[items]]\ntext = \"One\"\n").unwrap();
        assert_eq!(config.anchor_id.as_deref(), Some("multi-select-anchor"));
        assert!(config.use_default_validation);
        assert!(config.label.is_none());
        assert_eq!(config.items[0].value(), "One");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("widget.toml");

        let config = WidgetConfig {
            label: Some("Colors".into()),
            items: vec![ItemConfig::new("Red"), ItemConfig::with_value("Green", "g")],
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = WidgetConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.label.as_deref(), Some("Colors"));
        assert_eq!(loaded.items, config.items);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = WidgetConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "items = 3").unwrap();
        let err = WidgetConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}

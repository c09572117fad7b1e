//! Configuration management for myterm
//!
//! Widget and shell defaults, loadable from TOML or JSON files. Every field
//! has a default so partial files are accepted.

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::style::Theme;

pub use loader::{ConfigFormat, ConfigLoader, LoadOptions};

/// Main configuration structure for myterm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Widget presentation defaults
    pub widget: WidgetConfig,

    /// Shell defaults
    pub shell: ShellConfig,
}

/// Widget-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Prompt symbol shown before the input
    pub prompt_symbol: String,

    /// Spaces between the prompt symbol and the input
    pub prompt_spacing: usize,

    /// Initial theme
    pub theme: Theme,

    /// Whether the transcript scrollbar starts visible
    pub show_scrollbar: bool,

    /// Focus the input control on creation
    pub autofocus: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            prompt_symbol: "$".to_string(),
            prompt_spacing: 2,
            theme: Theme::Default,
            show_scrollbar: false,
            autofocus: true,
        }
    }
}

/// Shell-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Shell label
    pub name: String,

    /// Maximum number of history entries kept
    pub history_limit: usize,

    /// Prefix for echoed submissions
    pub echo_marker: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            name: "shell".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            echo_marker: ">> ".to_string(),
        }
    }
}

impl Config {
    /// Check field constraints
    pub fn validate(&self) -> Result<()> {
        if self.widget.prompt_symbol.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "widget.prompt_symbol".to_string(),
                reason: "Prompt symbol cannot be empty".to_string(),
            });
        }

        if self.widget.prompt_spacing > 16 {
            return Err(Error::ConfigValidationFailed {
                field: "widget.prompt_spacing".to_string(),
                reason: "Prompt spacing cannot exceed 16".to_string(),
            });
        }

        if self.shell.name.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "shell.name".to_string(),
                reason: "Shell name cannot be empty".to_string(),
            });
        }

        if self.shell.history_limit == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "shell.history_limit".to_string(),
                reason: "History limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParseFailed {
            format: "TOML".to_string(),
            reason: e.to_string(),
        })
    }

    /// Serialize to a TOML document
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigSerializationFailed {
            format: "TOML".to_string(),
            reason: e.to_string(),
        })
    }
}

//! Style kinds and themes
//!
//! Presentation hints carried by transcript lines and the widget. They have
//! no control-flow meaning; a host maps them to colours.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visual category of an echoed line or markup span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// Plain transcript text
    #[default]
    Log,
    /// Uses the active theme's accent colour
    Themed,
    Error,
    Success,
    Info,
    Warning,
}

impl StyleKind {
    /// All style kinds in declaration order
    pub const ALL: [StyleKind; 6] = [
        StyleKind::Log,
        StyleKind::Themed,
        StyleKind::Error,
        StyleKind::Success,
        StyleKind::Info,
        StyleKind::Warning,
    ];

    /// Map a markup class name to a style kind
    ///
    /// An empty class and `log` both mean the default kind. Unknown classes
    /// yield `None` so callers can keep the inherited kind.
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "" | "log" => Some(StyleKind::Log),
            "themed" => Some(StyleKind::Themed),
            "error" => Some(StyleKind::Error),
            "success" => Some(StyleKind::Success),
            "info" => Some(StyleKind::Info),
            "warning" => Some(StyleKind::Warning),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::Log => "log",
            StyleKind::Themed => "themed",
            StyleKind::Error => "error",
            StyleKind::Success => "success",
            StyleKind::Info => "info",
            StyleKind::Warning => "warning",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Widget colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Green,
    Cyan,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Green => "green",
            Theme::Cyan => "cyan",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(Theme::Default),
            "green" => Ok(Theme::Green),
            "cyan" => Ok(Theme::Cyan),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

//! Error types and Result aliases for myterm

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for myterm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for myterm
#[derive(Debug, Error)]
pub enum Error {
    // === Attachment errors ===
    /// Hijacker attach attempted on a shell that has no widget
    #[error("Shell '{shell}' must be attached to a widget first")]
    ShellNotAttached { shell: String },

    /// Shell belongs to a different widget than the one supplied
    #[error("Shell '{shell}' is attached to a different widget")]
    ShellWidgetMismatch { shell: String },

    /// Operation needs a shell but the widget has none
    #[error("No shell attached to terminal")]
    NoShellAttached,

    /// Hijacker is not attached to the shell it was asked to leave
    #[error("Hijacker '{hijacker}' is not attached to shell '{shell}'")]
    HijackerNotAttached { hijacker: String, shell: String },

    /// Hijacker is already attached to some shell
    #[error("Hijacker '{hijacker}' is already attached to a shell")]
    HijackerAlreadyAttached { hijacker: String },

    /// A hook tried to re-enter its own hijacker
    #[error("Hijacker '{hijacker}' is busy running a hook")]
    HijackerBusy { hijacker: String },

    /// The shell is out of the widget handling an event
    #[error("Shell '{shell}' is busy handling an event")]
    ShellBusy { shell: String },

    // === Handler faults ===
    /// A command handler returned an error
    #[error("Command '{command}' failed: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    /// A hijacker hook returned an error
    #[error("Hijacker '{hijacker}' failed in {hook}: {source}")]
    HookFailed {
        hijacker: String,
        hook: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Internal state that should always be consistent was not
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    // === Configuration errors ===
    /// Failed to load configuration file
    #[error("Failed to load config from '{}': {reason}", path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to save configuration file
    #[error("Failed to save config to '{}': {reason}", path.display())]
    ConfigSaveFailed { path: PathBuf, reason: String },

    /// Configuration file not found
    #[error("Configuration file not found")]
    ConfigNotFound,

    /// Configuration validation failed
    #[error("Configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    /// Failed to serialize configuration
    #[error("Failed to serialize config as {format}: {reason}")]
    ConfigSerializationFailed { format: String, reason: String },

    /// Failed to parse configuration
    #[error("Failed to parse {format} config: {reason}")]
    ConfigParseFailed { format: String, reason: String },

    // === I/O and serialization errors ===
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

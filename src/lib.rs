//! myterm - an embeddable terminal-style widget
//!
//! A headless terminal widget: a scrolling transcript, an input line and a
//! pluggable command shell. Hosts render the widget state however they like
//! and feed key events back in.
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`widget`] - Event routing and the output surface
//! - [`shell`] - Command registry, history, autocomplete and dispatch
//! - [`hijacker`] - Alternate key handling that temporarily takes over a shell
//! - [`commands`] - Named command handlers
//! - [`builtins`] - Ready-made `clear`, `help` and `toggleScrollbar`
//!
//! ### Supporting Modules
//!
//! - [`config`] - Configuration loading and defaults
//! - [`scheduler`] - Deferred tasks driven by the host's clock
//! - [`markup`] - Styled output from HTML-like fragments
//! - [`history`] / [`completion`] - Submission history and command completion
//! - [`ui`] / [`models`] - Transcript, input control and output lines
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use myterm::{builtins, Command, Config, Key, StyleKind, Widget};
//!
//! # fn main() -> myterm::Result<()> {
//! let mut widget = Widget::create_default(&Config::default());
//! widget.with_shell(|_, shell| {
//!     shell.extend_commands(builtins::defaults());
//!     shell.push_command(Command::new("hello", |widget, _, _, args| {
//!         widget.echo(format!("Hello {}", args.join(" ")), StyleKind::Success);
//!         Ok(())
//!     }));
//! });
//!
//! widget.type_text("hello world")?;
//! widget.dispatch_key(Key::Enter)?;
//! widget.tick();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Everything runs on the host's thread. A key event is handled
//! synchronously: the widget hands it to its shell, which either interprets
//! it or forwards it to an attached hijacker. Work that has to wait for the
//! next tick is queued on the widget's scheduler and runs when the host calls
//! [`Widget::tick`] or [`Widget::advance`].

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod builtins;
pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod hijacker;
pub mod key;
pub mod markup;
pub mod scheduler;
pub mod shell;
pub mod style;
pub mod widget;

// UI modules
pub mod ui;

// Model modules
pub mod models;

// Re-exports for core functionality
pub use commands::Command;
pub use config::{Config, ConfigLoader};
pub use error::{Error, Result};
pub use hijacker::{HijackContext, HijackHandler, HijackHooks, Hijacker};
pub use key::{Key, KeyEvent, Modifiers};
pub use models::OutputLine;
pub use scheduler::Task;
pub use shell::{Shell, ShellId};
pub use style::{StyleKind, Theme};
pub use widget::{Widget, WidgetId};

// Version information
/// The current version of myterm from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load configuration and build a widget with its default shell
///
/// Falls back to the default configuration when loading fails.
pub fn init() -> Widget {
    info!("Initializing {} v{}", NAME, VERSION);

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };

    Widget::create_default(&config)
}

/// Build a widget from a specific configuration file
pub fn init_with_config(config_path: &std::path::Path) -> Result<Widget> {
    info!(
        "Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    let config = ConfigLoader::new().load_from_path(config_path)?;
    config.validate()?;
    Ok(Widget::create_default(&config))
}

/// Human-readable explanation of a startup error
pub fn handle_startup_error(error: &Error) -> String {
    match error {
        Error::ConfigLoadFailed { path, reason } => {
            format!(
                "Configuration Error: Failed to load config from '{}': {}\n\nTry:\n• Check the file exists and is readable\n• Run without --config to use defaults",
                path.display(),
                reason
            )
        }
        Error::ConfigParseFailed { format, reason } => {
            format!(
                "Configuration Error: Failed to parse {} config: {}\n\nTry:\n• Check configuration file syntax",
                format, reason
            )
        }
        Error::ConfigValidationFailed { field, reason } => {
            format!(
                "Configuration Error: Validation failed for '{}': {}",
                field, reason
            )
        }
        _ => format!(
            "Unexpected Error: {}\n\nPlease report this issue with debug logs enabled",
            error
        ),
    }
}

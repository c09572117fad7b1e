//! Shell - the default keystroke interpreter
//!
//! A shell owns the command registry and the submission history. The widget
//! forwards every key event to its shell; the shell either handles the event
//! itself (submit, history navigation, autocomplete) or hands it to the
//! attached hijacker.

use std::fmt;

use uuid::Uuid;

use crate::commands::Command;
use crate::completion::{complete, Completion};
use crate::config::ShellConfig;
use crate::error::Result;
use crate::hijacker::Hijacker;
use crate::history::History;
use crate::key::{Key, KeyEvent};
use crate::scheduler::Task;
use crate::style::StyleKind;
use crate::widget::{Widget, WidgetId};

/// Default prefix for echoed submissions
pub const DEFAULT_ECHO_MARKER: &str = ">> ";

/// Opaque shell identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShellId(Uuid);

impl ShellId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ShellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Command shell
pub struct Shell {
    id: ShellId,
    /// Label used in help output and logs
    name: String,
    /// Widget this shell is attached to
    widget: Option<WidgetId>,
    /// Registered commands in lookup order
    commands: Vec<Command>,
    /// Hijacker currently intercepting key events
    hijacker: Option<Hijacker>,
    history: History,
    echo_marker: String,
}

impl Shell {
    /// Create a shell with default history settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ShellId::new(),
            name: name.into(),
            widget: None,
            commands: Vec::new(),
            hijacker: None,
            history: History::new(),
            echo_marker: DEFAULT_ECHO_MARKER.to_string(),
        }
    }

    /// Create a shell from configuration
    pub fn from_config(config: &ShellConfig) -> Self {
        let mut shell = Self::new(config.name.clone());
        shell.history = History::with_limit(config.history_limit);
        shell.echo_marker = config.echo_marker.clone();
        shell
    }

    pub fn id(&self) -> ShellId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Widget this shell is attached to, if any
    pub fn widget_id(&self) -> Option<WidgetId> {
        self.widget
    }

    pub fn is_attached(&self) -> bool {
        self.widget.is_some()
    }

    /// Attach this shell to `widget`
    ///
    /// Returns the shell the widget held before, already detached.
    pub fn attach_to(self, widget: &mut Widget) -> Result<Option<Shell>> {
        widget.attach_shell(self)
    }

    pub(crate) fn set_widget(&mut self, widget: Option<WidgetId>) {
        self.widget = widget;
    }

    /// Registered commands in lookup order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Register a command
    ///
    /// Lookup takes the first match, so a duplicate name is kept but never
    /// reached.
    pub fn push_command(&mut self, command: Command) {
        if self.find_command(command.name()).is_some() {
            warn!(
                "Shell '{}' already has a command named '{}'; the new one is shadowed",
                self.name,
                command.name()
            );
        }
        debug!("Registered command '{}' on shell '{}'", command.name(), self.name);
        self.commands.push(command);
    }

    /// Register several commands in order
    pub fn extend_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.push_command(command);
        }
    }

    /// Remove the first command with `name`
    pub fn remove_command(&mut self, name: &str) -> Option<Command> {
        let position = self.commands.iter().position(|c| c.name() == name)?;
        Some(self.commands.remove(position))
    }

    /// First command with exactly `name`
    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// Hijacker currently attached
    pub fn hijacker(&self) -> Option<&Hijacker> {
        self.hijacker.as_ref()
    }

    pub fn is_hijacked(&self) -> bool {
        self.hijacker.is_some()
    }

    pub(crate) fn set_hijacker(&mut self, hijacker: Option<Hijacker>) {
        self.hijacker = hijacker;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// History cursor, `history().len()` on the live line
    pub fn history_index(&self) -> isize {
        self.history.index()
    }

    pub fn echo_marker(&self) -> &str {
        &self.echo_marker
    }

    /// Echo every command name, indented, in registration order
    pub fn show_help(&self, widget: &mut Widget) {
        for command in &self.commands {
            widget.echo(format!("    {}", command.name()), StyleKind::Log);
        }
    }

    /// Interpret a key event
    pub fn handle_key_down(&mut self, widget: &mut Widget, event: &mut KeyEvent) -> Result<()> {
        if let Some(hijacker) = self.hijacker.clone() {
            trace!("Shell '{}' forwarding {} to '{}'", self.name, event.key, hijacker.name());
            return hijacker.handle_key_down(widget, self, event);
        }

        match event.key {
            Key::Enter => {
                event.prevent_default();
                self.submit(widget)
            }
            Key::ArrowUp => {
                event.prevent_default();
                self.navigate_history(widget, -1);
                Ok(())
            }
            Key::ArrowDown => {
                event.prevent_default();
                self.navigate_history(widget, 1);
                Ok(())
            }
            Key::Tab => {
                event.prevent_default();
                self.autocomplete(widget);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn submit(&mut self, widget: &mut Widget) -> Result<()> {
        let line = widget.input_value().trim().to_string();
        if line.is_empty() {
            return Ok(());
        }

        self.history.push(line.clone());
        widget.echo(format!("{}{}", self.echo_marker, line), StyleKind::Log);

        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match self.find_command(name).cloned() {
            Some(command) => command.execute(widget, self, &args)?,
            None => {
                debug!("Shell '{}' has no command '{}'", self.name, name);
                widget.echo(format!("{} is not a valid command", name), StyleKind::Log);
            }
        }

        widget.scroll_to_bottom();
        let revision = widget.input().revision();
        widget.schedule(
            std::time::Duration::ZERO,
            Task::ClearInput {
                unless_edited_since: Some(revision),
            },
        );
        Ok(())
    }

    fn navigate_history(&mut self, widget: &mut Widget, direction: isize) {
        if let Some(value) = self.history.navigate(direction) {
            widget.set_input_value(value);
        }
    }

    fn autocomplete(&self, widget: &mut Widget) {
        let partial = widget.input_value().trim().to_string();
        match complete(&partial, self.commands.iter().map(Command::name)) {
            Completion::NoMatch => {}
            Completion::Unique(name) => widget.set_input_value(name),
            Completion::Ambiguous(names) => {
                widget.echo(format!("Available: {}", names.join(", ")), StyleKind::Info)
            }
        }
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("widget", &self.widget)
            .field("commands", &self.commands)
            .field("hijacker", &self.hijacker.as_ref().map(Hijacker::name))
            .field("history", &self.history.len())
            .finish()
    }
}
